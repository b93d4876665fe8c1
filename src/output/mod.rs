//! Output formatting module.
//!
//! Terminal output for both modes. Saved reports live in [`crate::report`].

mod live;
mod plain;

pub use live::ConsoleObserver;
pub use plain::{
    live_host_line, open_port_row, print_error, print_info, print_scan_header,
    print_scan_summary, print_success, print_sweep_header, print_sweep_summary, print_warning,
    table_header,
};
