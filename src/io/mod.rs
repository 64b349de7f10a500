//! Process orchestration around the Playwright listing command.

pub mod runner;

pub use runner::{run_playwright_list, ListError, ListInvocation};
