//! Concrete interpreter for fast validation of instruction sequences

use crate::ir::{Instruction, Operand, Register};
use crate::semantics::state::{ConcreteMachineState, ConcreteValue, LiveOutMask};

/// Evaluate an operand to get its concrete value
fn eval_operand(state: &ConcreteMachineState, operand: &Operand) -> ConcreteValue {
    match operand {
        Operand::Register(reg) => state.get_register(*reg),
        Operand::Immediate(imm) => ConcreteValue::from_i64(*imm),
    }
}

/// Apply a single instruction to a concrete machine state
pub fn apply_instruction_concrete(
    mut state: ConcreteMachineState,
    instruction: &Instruction,
) -> ConcreteMachineState {
    match instruction {
        Instruction::MovReg { rd, rn } => {
            let value = state.get_register(*rn);
            state.set_register(*rd, value);
        }
        Instruction::MovImm { rd, imm } => {
            let value = ConcreteValue::from_i64(*imm);
            state.set_register(*rd, value);
        }
        Instruction::Add { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = eval_operand(&state, rm).as_u64();
            let result = lhs.wrapping_add(rhs);
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Sub { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = eval_operand(&state, rm).as_u64();
            let result = lhs.wrapping_sub(rhs);
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::And { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = eval_operand(&state, rm).as_u64();
            let result = lhs & rhs;
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Orr { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = eval_operand(&state, rm).as_u64();
            let result = lhs | rhs;
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Eor { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = eval_operand(&state, rm).as_u64();
            let result = lhs ^ rhs;
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Lsl { rd, rn, shift } => {
            let value = state.get_register(*rn).as_u64();
            let shift_amount = eval_operand(&state, shift).as_u64() & 63;
            let result = value << shift_amount;
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Lsr { rd, rn, shift } => {
            let value = state.get_register(*rn).as_u64();
            let shift_amount = eval_operand(&state, shift).as_u64() & 63;
            let result = value >> shift_amount;
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Asr { rd, rn, shift } => {
            let value = state.get_register(*rn).as_i64();
            let shift_amount = eval_operand(&state, shift).as_u64() & 63;
            let result = value >> shift_amount;
            state.set_register(*rd, ConcreteValue::from_i64(result));
        }
        Instruction::Mul { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = state.get_register(*rm).as_u64();
            let result = lhs.wrapping_mul(rhs);
            state.set_register(*rd, ConcreteValue::new(result));
        }
        Instruction::Sdiv { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_i64();
            let rhs = state.get_register(*rm).as_i64();
            let result = if rhs == 0 {
                0 // Division by zero returns 0 in AArch64
            } else if lhs == i64::MIN && rhs == -1 {
                i64::MIN // Overflow case returns dividend
            } else {
                lhs / rhs
            };
            state.set_register(*rd, ConcreteValue::from_i64(result));
        }
        Instruction::Udiv { rd, rn, rm } => {
            let lhs = state.get_register(*rn).as_u64();
            let rhs = state.get_register(*rm).as_u64();
            let result = if rhs == 0 {
                0 // Division by zero returns 0 in AArch64
            } else {
                lhs / rhs
            };
            state.set_register(*rd, ConcreteValue::new(result));
        }
    }
    state
}

/// Apply a sequence of instructions to a concrete machine state
pub fn apply_sequence_concrete(
    mut state: ConcreteMachineState,
    instructions: &[Instruction],
) -> ConcreteMachineState {
    for instruction in instructions {
        state = apply_instruction_concrete(state, instruction);
    }
    state
}

/// Check if two concrete states are equal for the specified live-out registers
pub fn states_equal_for_live_out(
    state1: &ConcreteMachineState,
    state2: &ConcreteMachineState,
    live_out: &LiveOutMask,
) -> bool {
    for reg in live_out.iter() {
        if state1.get_register(*reg) != state2.get_register(*reg) {
            return false;
        }
    }
    true
}

/// Find the first differing register between two states for live-out registers
pub fn find_first_difference(
    state1: &ConcreteMachineState,
    state2: &ConcreteMachineState,
    live_out: &LiveOutMask,
) -> Option<(Register, ConcreteValue, ConcreteValue)> {
    for reg in live_out.iter() {
        let v1 = state1.get_register(*reg);
        let v2 = state2.get_register(*reg);
        if v1 != v2 {
            return Some((*reg, v1, v2));
        }
    }
    None
}
