#![allow(dead_code)]

pub mod driver;
pub mod eternity;
pub mod solver;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::{BTreeSet, HashMap, HashSet};
    }
}

pub mod prelude {
    pub use super::driver::*;
    pub use super::eternity::prelude::*;
    pub use super::solver::*;
    pub use super::utils::prelude::*;
}
