//! Contains modules to interface with the q IPC format, [`ipc`].
pub mod ipc;
