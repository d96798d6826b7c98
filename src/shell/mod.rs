// Composition root.
//
// - Read config from the environment.
// - Instantiate the in-memory infrastructure and wire it into the use case handlers.
// - Expose the HTTP router and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
