//! One module per subcommand.

pub mod badges;
pub mod facts;
pub mod history;
pub mod prefs;
pub mod quiz;
pub mod reset;
pub mod stats;
