//! Keynest - a hierarchical encrypted key-value store for the command line.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── get/set/rm    # Value CRUD by dot-path
//! │   ├── list/tree     # Masked views of the store
//! │   ├── search        # Plaintext search (never matches ciphertext)
//! │   ├── alias         # Short names for long paths
//! │   ├── guard         # Confirmation-required paths
//! │   ├── import/export # Diff-aware JSON import, masked export
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── dotpath       # Dot-path get/set/remove/flatten on JSON trees
//!     ├── crypto        # Per-value AES-256-GCM encryption and masking
//!     ├── merge         # Deep-merge and structural diff engine
//!     ├── store/        # Locked, cached, atomic persistence
//!     │   ├── lock      # Cross-process lock sidecar
//!     │   └── cache     # mtime-keyed read-through cache
//!     └── config        # Settings file and store directory resolution
//! ```
//!
//! # Features
//!
//! - Dot-notation access into a nested JSON tree (`server.production.ip`)
//! - Optional per-value encryption under a password (PBKDF2 + AES-256-GCM)
//! - Encrypted values are always masked on display, export, and search
//! - Cross-process-safe writes: lock sidecar plus atomic temp-file rename
//! - Diff preview before any import touches the store

pub mod cli;
pub mod core;
pub mod error;
