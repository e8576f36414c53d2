pub mod arg_builder;
pub mod fake_github;
pub mod prelude;
pub mod project;
