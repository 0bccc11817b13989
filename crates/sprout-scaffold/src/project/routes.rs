//! Starter `routes/` directory for augmented projects

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const ROUTES_DIR: &str = "routes";
pub const README_FILE: &str = "README.md";
pub const EXAMPLE_ROUTE_FILE: &str = "users.ts";

const README_TEMPLATE: &str = r#"# Routes

Every file in this directory defines one HTTP route. Start the API server
with `{tool} dev` and new route files are picked up automatically.

## Route files

A route file default-exports an object with three fields:

| Field     | Type                                         | Description                        |
| --------- | -------------------------------------------- | ---------------------------------- |
| `method`  | `"GET" \| "POST" \| "PUT" \| "PATCH" \| "DELETE"` | HTTP method the route answers      |
| `path`    | `string`                                     | URL path, e.g. `/users/:id`        |
| `handler` | `async (request: Request) => unknown`        | Produces the response body         |

Whatever the handler returns is sent back as JSON.

## Example

```ts
export default {
  method: "GET",
  path: "/health",
  handler: async () => {
    return { status: "ok" };
  },
};
```

See `users.ts` for a complete route.
"#;

const EXAMPLE_ROUTE: &str = r#"const users = [
  { id: 1, name: "Ada Lovelace", email: "ada@example.com" },
  { id: 2, name: "Grace Hopper", email: "grace@example.com" },
  { id: 3, name: "Alan Turing", email: "alan@example.com" },
];

export default {
  method: "GET",
  path: "/users",
  handler: async () => {
    return users;
  },
};
"#;

/// README describing the route-file contract for `tool`
pub fn readme(tool: &str) -> String {
    README_TEMPLATE.replace("{tool}", tool)
}

pub fn example_route() -> &'static str {
    EXAMPLE_ROUTE
}

/// Create `routes/` with its README and example route
///
/// Refuses to touch an existing `routes` entry of any kind.
pub async fn create_routes_scaffold(root_dir: &Path, tool: &str) -> Result<PathBuf> {
    let routes_dir = root_dir.join(ROUTES_DIR);

    if fs::symlink_metadata(&routes_dir).await.is_ok() {
        return Err(ScaffoldError::RoutesDirectoryExists { path: routes_dir });
    }

    fs::create_dir(&routes_dir).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            ScaffoldError::RoutesDirectoryExists {
                path: routes_dir.clone(),
            }
        } else {
            ScaffoldError::io("create directory", &routes_dir, e)
        }
    })?;

    let readme_path = routes_dir.join(README_FILE);
    fs::write(&readme_path, readme(tool))
        .await
        .map_err(|e| ScaffoldError::io("write", &readme_path, e))?;

    let example_path = routes_dir.join(EXAMPLE_ROUTE_FILE);
    fs::write(&example_path, example_route())
        .await
        .map_err(|e| ScaffoldError::io("write", &example_path, e))?;

    tracing::debug!(dir = %routes_dir.display(), "created routes scaffold");
    Ok(routes_dir)
}
