pub mod jwt;
pub mod middleware;

pub use jwt::{issue_token, validate_token, JwtClaims};
pub use middleware::{auth_middleware, AuthContext, AuthState};
