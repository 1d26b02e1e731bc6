pub mod bindings;
pub mod check;
pub mod deploy;
