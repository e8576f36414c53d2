pub use crate::helpers::arg_builder::*;
pub use crate::helpers::archive_builder::archive;
pub use crate::helpers::fake_github::FakeGithub;
pub use crate::helpers::project::tempdir;
pub use assert_cmd::prelude::*;
pub use indoc::indoc;
pub use predicates::prelude::*;
