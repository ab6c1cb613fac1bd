//! Symbol resolution, the second pass over a parsed program.
//!
//! Reserved-storage (DS) variables carry no meaningful value of their
//! own; they are placed in the bytes directly after the code, in
//! declaration order. Any instruction operand naming one is then
//! patched to the assigned address. Variables declared with DB, EQU or
//! ORG keep their literal value and operands naming them are left
//! alone, as are numeric operands.
use super::ast::{Address, Program};

/// Assign addresses to DS variables and patch operands that name them.
///
/// Never fails. Must run exactly once per parse: patching replaces
/// variable names with hex address text, so a second run would find
/// nothing left to match.
pub fn resolve(program: &mut Program) {
    // Storage starts right past the last instruction word. The counter
    // is a machine address, so it wraps at the 8-bit boundary.
    let mut address = program.instructions.len() as Address;

    for variable in program.variables.values_mut() {
        if variable.kind.reserves_storage() {
            variable.value = address;
            address = address.wrapping_add(1);
        }
    }

    for instruction in program.instructions.iter_mut() {
        if let Some(operand) = &instruction.operand {
            if let Some(variable) = program.variables.get(operand) {
                if variable.kind.reserves_storage() {
                    instruction.operand = Some(format!("{:02X}", variable.value));
                }
            }
        }
    }
}
