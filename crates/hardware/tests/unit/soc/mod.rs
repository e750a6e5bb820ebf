

/// End-to-end system assembly and netlist.
pub mod system;
