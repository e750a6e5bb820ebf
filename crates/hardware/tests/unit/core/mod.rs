
/// ISA interrupt binding.
pub mod interrupts;
