/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::code::*;
use crate::emitter::constants::*;

// helper functions mapping the typed operands onto their bit positions

pub(crate) fn reg_index(reg: GeckoReg) -> u32 {
    match reg {
        GeckoReg::R0 => 0,
        GeckoReg::R1 => 1,
        GeckoReg::R2 => 2,
        GeckoReg::R3 => 3,
        GeckoReg::R4 => 4,
        GeckoReg::R5 => 5,
        GeckoReg::R6 => 6,
        GeckoReg::R7 => 7,
        GeckoReg::R8 => 8,
        GeckoReg::R9 => 9,
        GeckoReg::R10 => 10,
        GeckoReg::R11 => 11,
        GeckoReg::R12 => 12,
        GeckoReg::R13 => 13,
        GeckoReg::R14 => 14,
        GeckoReg::R15 => 15,
    }
}

pub(crate) fn block_index(block: Block) -> u32 {
    match block {
        Block::B0 => 0,
        Block::B1 => 1,
        Block::B2 => 2,
        Block::B3 => 3,
        Block::B4 => 4,
        Block::B5 => 5,
        Block::B6 => 6,
        Block::B7 => 7,
        Block::B8 => 8,
        Block::B9 => 9,
        Block::B10 => 10,
    }
}

fn compare_index(cmp: Compare) -> u32 {
    match cmp {
        Compare::Equal => 0,
        Compare::NotEqual => 1,
        Compare::GreaterThan => 2,
        Compare::LessThan => 3,
    }
}

fn code_flag_bits(flags: CodeFlags) -> u32 {
    let mut bits = 0;
    if flags.use_pointer {
        bits |= FLAG_USE_POINTER;
    }
    if flags.addr_is_stack {
        bits |= FLAG_ADDR_IS_STACK;
    }
    bits
}

fn offset_flag_bits(off: OffsetFlags) -> u32 {
    let mut bits = 0;
    if off.gecko_reg {
        bits |= OFF_GECKO_REG;
    }
    if off.ptr_or_base_addr {
        bits |= OFF_PTR_OR_BASE_ADDR;
    }
    if off.add_to {
        bits |= OFF_ADD_TO;
    }
    bits
}

fn counter_flag_bits(cflags: CounterFlags) -> u32 {
    let mut bits = 0;
    if cflags.invert {
        bits |= CNTR_INVERT;
    }
    if cflags.endif {
        bits |= CNTR_ENDIF;
    }
    bits
}

fn exec_bits(status: ExecStatus) -> u32 {
    match status {
        ExecStatus::True => EXEC_TRUE,
        ExecStatus::False => EXEC_FALSE,
        ExecStatus::Either => EXEC_EITHER,
    }
}

fn reg_width_bits(width: RegWidth) -> u32 {
    let sel = match width {
        RegWidth::W8 => 0,
        RegWidth::W16 => 1,
        RegWidth::W32 => 2,
    };
    sel << REG_WIDTH_SHIFT
}

fn serial_width_bits(width: SerialWidth) -> u32 {
    let sel = match width {
        SerialWidth::W8 => 0,
        SerialWidth::W16 => 1,
        SerialWidth::W32 => 2,
    };
    sel << SERIAL_WIDTH_SHIFT
}

fn reg_op_bits(op: RegOp) -> u32 {
    let sel = match op {
        RegOp::Add => 0x0,
        RegOp::Multiply => 0x1,
        RegOp::Or => 0x2,
        RegOp::And => 0x3,
        RegOp::Xor => 0x4,
        RegOp::ShiftLeft => 0x5,
        RegOp::ShiftRight => 0x6,
        RegOp::RotateLeft => 0x7,
        RegOp::SignedShiftRight => 0x8,
        RegOp::FloatAdd => 0x9,
        RegOp::FloatMultiply => 0xA,
    };
    sel << REG_OP_SHIFT
}

fn reg_op_ref_bits(refs: RegOpRef) -> u32 {
    let sel = match refs {
        RegOpRef::SrcValDstVal => 0x0,
        RegOpRef::SrcDerefDstVal => 0x1,
        RegOpRef::SrcValDstDeref => 0x2,
        RegOpRef::SrcDerefDstDeref => 0x3,
    };
    sel << REG_OP_REF_SHIFT
}

fn anchor_subtype(anchor: Anchor, action: AnchorAction) -> u32 {
    match (anchor, action) {
        (Anchor::BaseAddress, AnchorAction::Load) => ST_BA_LOAD,
        (Anchor::BaseAddress, AnchorAction::Set) => ST_BA_SET,
        (Anchor::BaseAddress, AnchorAction::Store) => ST_BA_STORE,
        (Anchor::PointerOffset, AnchorAction::Load) => ST_PO_LOAD,
        (Anchor::PointerOffset, AnchorAction::Set) => ST_PO_SET,
        (Anchor::PointerOffset, AnchorAction::Store) => ST_PO_STORE,
    }
}

/// Collapses the register selector of a memcpy anchor side or a special-if
/// compare side. Register 15 holds the resolved anchor at runtime, so it is
/// unusable as an operand and falls back to 14; no register (or an explicit
/// pointer request) selects 15 itself.
fn pointer_side_index(reg: Option<GeckoReg>, use_pointer: bool) -> u32 {
    let idx = match reg {
        Some(GeckoReg::R15) => reg_index(GeckoReg::R14),
        Some(r) => reg_index(r),
        None => 15,
    };
    if reg.is_none() || use_pointer { 15 } else { idx }
}

/// Line offsets are given relative to the current line; the stored field is
/// relative to the line after it. Zero is normalized to one, and backward
/// offsets skip the two words of the current line.
fn control_flow_line_offset(offs: i16) -> u32 {
    let mut offs = offs as i32;
    if offs == 0 {
        offs = 1;
    } else if offs < 0 {
        offs += 2;
    }
    ((offs - 1) as u32) & 0xFFFF
}

fn control_flow(subtype: u32, status: ExecStatus, count: u32, offs: i16, block: Option<Block>) -> (u32, u32) {
    let block = block.unwrap_or(Block::B0);
    let header = CT_CONTROL_FLOW
        | subtype
        | exec_bits(status)
        | count
        | control_flow_line_offset(offs);
    (header, block_index(block))
}

/// Translates one code into its header and payload words.
///
/// This match is the single source of truth for the bit layout. For the
/// three payload-carrying codes the returned payload word is the length
/// field; the body follows separately (see the payload builders below).
/// A serial write's second line comes from `encode_serial_step`.
pub(crate) fn encode(code: &Code) -> (u32, u32) {
    match *code {
        // --------- CT0: Write ---------
        Code::Write8 { addr, val, extra, flags } => (
            CT_WRITE | ST_WRITE8 | code_flag_bits(flags) | addr,
            ((extra as u32) << 16) | val as u32,
        ),
        Code::Write16 { addr, val, extra, flags } => (
            CT_WRITE | ST_WRITE16 | code_flag_bits(flags) | addr,
            ((extra as u32) << 16) | val as u32,
        ),
        Code::Write32 { addr, val, flags } => {
            (CT_WRITE | ST_WRITE32 | code_flag_bits(flags) | addr, val)
        }
        Code::WriteString { addr, data, flags } => (
            CT_WRITE | ST_WRITE_STRING | code_flag_bits(flags) | addr,
            data.len() as u32,
        ),
        Code::WriteSerial { addr, val, flags, .. } => {
            (CT_WRITE | ST_WRITE_SERIAL | code_flag_bits(flags) | addr, val)
        }

        // --------- CT1: Regular If ---------
        Code::If32 { cmp, addr, val, endif, flags } => (
            CT_REGULAR_IF
                | (compare_index(cmp) << 25)
                | code_flag_bits(flags)
                | addr.wrapping_add(endif as u32),
            val,
        ),
        Code::If16 { cmp, addr, val, mask, endif, flags } => (
            CT_REGULAR_IF
                | ST_IF_16BIT
                | (compare_index(cmp) << 25)
                | code_flag_bits(flags)
                | addr.wrapping_add(endif as u32),
            ((mask as u32) << 16) | val as u32,
        ),

        // --------- CT2: Base Address / Pointer Offset ---------
        Code::AnchorOp { anchor, action, addr, reg, off, flags } => {
            let mut off = off;
            let mut flags = flags;
            if action == AnchorAction::Store {
                off.add_to = false;
            }
            let reg_bits = match reg {
                Some(r) => reg_index(r),
                None => {
                    off.gecko_reg = false;
                    0
                }
            };
            if flags.use_pointer {
                off.ptr_or_base_addr = true;
            }
            flags.addr_is_stack = false;

            let header = CT_BA_OR_PO
                | anchor_subtype(anchor, action)
                | code_flag_bits(flags)
                | offset_flag_bits(off)
                | reg_bits;
            (header, addr)
        }
        Code::AnchorToCode { anchor, offs } => {
            let subtype = match anchor {
                Anchor::BaseAddress => ST_BA_SET_CODE,
                Anchor::PointerOffset => ST_PO_SET_CODE,
            };
            (CT_BA_OR_PO | subtype | (offs as u16 as u32), 0)
        }

        // --------- CT3: Control Flow ---------
        Code::SetRepeat { count, block } => {
            control_flow(ST_REPEAT_SET, ExecStatus::True, count as u32, 1, block)
        }
        Code::ExecuteRepeat { block } => {
            control_flow(ST_REPEAT_EXEC, ExecStatus::True, 0, 1, block)
        }
        Code::Return { status, block } => control_flow(ST_RETURN, status, 0, 1, block),
        Code::Goto { status, offs } => control_flow(ST_GOTO, status, 0, offs, None),
        Code::Gosub { status, offs, block } => control_flow(ST_GOSUB, status, 0, offs, block),

        // --------- CT4: Gecko Register ---------
        Code::SetReg { reg, val, off, flags } => {
            (gecko_reg_header(ST_REG_SET, reg, RegWidth::W8, off, flags), val)
        }
        Code::LoadReg { reg, width, addr, off, flags } => {
            (gecko_reg_header(ST_REG_LOAD, reg, width, off, flags), addr)
        }
        Code::StoreReg { reg, width, addr, off, flags } => {
            (gecko_reg_header(ST_REG_STORE, reg, width, off, flags), addr)
        }
        Code::RegDirectOp { op, reg, refs, val } => {
            let reg = reg.map_or(0, reg_index);
            let header =
                CT_GECKO_REG | ST_REG_DIRECT_OP | reg_op_bits(op) | reg_op_ref_bits(refs) | reg;
            (header, val)
        }
        Code::RegRegOp { op, dst, src, refs } => {
            let dst = dst.map_or(0, reg_index);
            let src = src.map_or(0, reg_index);
            let header =
                CT_GECKO_REG | ST_REG_REG_OP | reg_op_bits(op) | reg_op_ref_bits(refs) | dst;
            (header, src)
        }
        Code::CopyRegToMem { src, anchor_reg, addr, count, flags } => {
            let mut flags = flags;
            flags.addr_is_stack = false;
            let src = src.map_or(0, reg_index);
            let anchor = pointer_side_index(anchor_reg, flags.use_pointer);
            let header = CT_GECKO_REG
                | ST_MEMCPY_FROM_REG
                | code_flag_bits(flags)
                | ((count as u32) << 8)
                | (src << 4)
                | anchor;
            (header, addr)
        }
        Code::CopyMemToReg { anchor_reg, dst, addr, count, flags } => {
            let mut flags = flags;
            flags.addr_is_stack = false;
            let dst = dst.map_or(0, reg_index);
            let anchor = pointer_side_index(anchor_reg, flags.use_pointer);
            let header = CT_GECKO_REG
                | ST_MEMCPY_TO_REG
                | code_flag_bits(flags)
                | ((count as u32) << 8)
                | (anchor << 4)
                | dst;
            (header, addr)
        }

        // --------- CT5: Special If ---------
        Code::IfReg16 { cmp, left, right, addr, mask, endif, flags } => {
            let mut addr = addr;
            let mut flags = flags;
            if left.is_some() && right.is_some() {
                // Register-register compares embed no address.
                addr = 0;
                flags = CodeFlags::NONE;
            }
            let left = pointer_side_index(left, flags.use_pointer);
            let right = pointer_side_index(right, flags.use_pointer);

            let header = CT_SPECIAL_IF
                | (compare_index(cmp) << 25)
                | code_flag_bits(flags)
                | addr.wrapping_add(endif as u32);
            (header, (right << 28) | (left << 24) | mask as u32)
        }
        Code::IfCounter16 { cmp, counter, max, mask, cflags } => {
            let header = CT_SPECIAL_IF
                | ST_IF_COUNTER
                | (compare_index(cmp) << 25)
                | counter_flag_bits(cflags)
                | ((counter as u32) << 4);
            (header, ((mask as u32) << 16) | max as u32)
        }

        // --------- CT6: Misc ---------
        Code::ExecuteAsm { words } => (
            CT_MISC | ST_ASM_EXECUTE,
            words.len().div_ceil(2) as u32,
        ),
        Code::InsertAsm { addr, words, flags } => {
            let pairs = if words.len() % 2 == 0 {
                words.len() / 2 + 1
            } else {
                words.len().div_ceil(2)
            };
            (
                CT_MISC | ST_ASM_INSERT | code_flag_bits(flags) | addr,
                pairs as u32,
            )
        }
        Code::CreateBranch { addr, target, flags } => {
            (CT_MISC | ST_ASM_BRANCH | code_flag_bits(flags) | addr, target)
        }
        Code::Switch => (CT_MISC | ST_SWITCH, 0),
        Code::RangeCheck { start, end, endif, flags } => {
            let mut flags = flags;
            flags.addr_is_stack = false;
            let header = CT_MISC | ST_RANGE_CHECK | code_flag_bits(flags) | endif as u32;
            (header, ((start as u32) << 16) | end as u32)
        }

        // --------- CT7: End ---------
        Code::FullTerminator { ba, po } => (
            CT_END | ST_FULL_TERMINATOR,
            ((ba as u32) << 16) | po as u32,
        ),
        Code::Endif { count, do_else, ba, po } => (
            CT_END | ST_ENDIF_ELSE | ((do_else as u32) << 20) | count as u32,
            ((ba as u32) << 16) | po as u32,
        ),
        Code::EndOfCodeList => (CT_END | ST_END_OF_CODE, 0),
    }
}

fn gecko_reg_header(
    subtype: u32,
    reg: Option<GeckoReg>,
    width: RegWidth,
    off: OffsetFlags,
    flags: CodeFlags,
) -> u32 {
    let mut off = off;
    let mut flags = flags;
    let reg = reg.map_or(0, reg_index);
    if subtype != ST_REG_SET {
        // Bits 21:20 carry the data width instead of the add-to flag.
        off.add_to = false;
    }
    if flags.use_pointer {
        off.ptr_or_base_addr = true;
    }
    off.gecko_reg = false;
    flags.addr_is_stack = false;

    let width = if subtype == ST_REG_SET {
        0
    } else {
        reg_width_bits(width)
    };
    CT_GECKO_REG | subtype | code_flag_bits(flags) | offset_flag_bits(off) | width | reg
}

/// Second line of a serial write: address stride, data width, and the
/// zero-based step count. A count of zero behaves as one.
pub(crate) fn encode_serial_step(
    width: SerialWidth,
    count: u16,
    addr_step: u16,
    val_step: u32,
) -> (u32, u32) {
    let steps = (count.max(1) as u32 - 1) & 0x0FFF;
    (
        addr_step as u32 | serial_width_bits(width) | (steps << 16),
        val_step,
    )
}

// payload builders; each returns the body exactly as it goes out on the wire

/// String payloads are padded with zeros to a multiple of eight bytes.
pub(crate) fn string_payload(data: &[u8]) -> Vec<u8> {
    let mut padded = data.to_vec();
    padded.resize(data.len().div_ceil(8) * 8, 0);
    padded
}

/// Execute-assembly blobs are padded with a zero word to an even count.
/// The caller must end the blob with `blr` (0x4E800020).
pub(crate) fn execute_asm_payload(words: &[u32]) -> Vec<u32> {
    let mut padded = words.to_vec();
    padded.resize(words.len().div_ceil(2) * 2, 0);
    padded
}

/// Insert-assembly blobs always gain a zero terminator word; when the blob
/// is already even-length the handler still needs the terminator pair, so a
/// `nop` is inserted ahead of it.
pub(crate) fn insert_asm_payload(words: &[u32]) -> Vec<u32> {
    let mut len = words.len().div_ceil(2) * 2;
    if len == words.len() {
        len += 2;
    }
    let mut padded = words.to_vec();
    for i in words.len()..len {
        padded.push(if i % 2 == 0 { PPC_NOP } else { 0 });
    }
    padded
}
