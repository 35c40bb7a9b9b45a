//! Adapters: concrete implementations of the link port.
//!
//! | Adapter    | Implements     | Connects to                |
//! |------------|----------------|----------------------------|
//! | `memory`   | LinkTransport  | In-memory recorder (host)  |
//! | `uart`     | LinkTransport  | ESP-IDF UART driver        |
//! | `log_sink` | init handler   | Serial log output          |

pub mod log_sink;
pub mod memory;
#[cfg(target_os = "espidf")]
pub mod uart;
