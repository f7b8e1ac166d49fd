pub mod import;
pub mod jobs;
pub mod mcp;
pub mod plan;
pub mod pr;
pub mod report;
pub mod route;
pub mod scaffold;
pub mod slash;
pub mod split;
