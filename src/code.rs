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

use std::ops::BitOr;

/// One of the sixteen scratch words owned by the code handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeckoReg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

/// One of the eleven callee-saved state slots used for repeat/gosub pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
}

/// Unsigned comparison operator shared by every conditional code type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

/// The code handler's execution-status register, tested by control flow codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    True,
    False,
    Either,
}

/// Which runtime anchor a base-address/pointer code manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    BaseAddress,
    PointerOffset,
}

/// What a base-address/pointer code does with its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAction {
    /// anchor = *addr
    Load,
    /// anchor = value (or anchor += value)
    Set,
    /// *addr = anchor
    Store,
}

/// Data width of a register load/store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegWidth {
    W8,
    W16,
    W32,
}

/// Data width of a serial write's per-step store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialWidth {
    W8,
    W16,
    W32,
}

/// ALU operation applied by a register-operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegOp {
    Add,
    Multiply,
    Or,
    And,
    Xor,
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    SignedShiftRight,
    FloatAdd,
    FloatMultiply,
}

/// Whether each operand of a register operation is used directly or
/// dereferenced as an address first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegOpRef {
    SrcValDstVal,
    SrcDerefDstVal,
    SrcValDstDeref,
    SrcDerefDstDeref,
}

/// Per-code flags: which anchor the embedded address is relative to.
///
/// Families that do not honor a flag strip it at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeFlags {
    pub use_pointer: bool,
    pub addr_is_stack: bool,
}

impl CodeFlags {
    pub const NONE: CodeFlags = CodeFlags {
        use_pointer: false,
        addr_is_stack: false,
    };
    pub const USE_POINTER: CodeFlags = CodeFlags {
        use_pointer: true,
        addr_is_stack: false,
    };
    pub const ADDR_IS_STACK: CodeFlags = CodeFlags {
        use_pointer: false,
        addr_is_stack: true,
    };
}

impl BitOr for CodeFlags {
    type Output = CodeFlags;

    fn bitor(self, rhs: CodeFlags) -> CodeFlags {
        CodeFlags {
            use_pointer: self.use_pointer || rhs.use_pointer,
            addr_is_stack: self.addr_is_stack || rhs.addr_is_stack,
        }
    }
}

/// Offset flags of the base-address/pointer and register families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetFlags {
    pub gecko_reg: bool,
    pub ptr_or_base_addr: bool,
    pub add_to: bool,
}

impl OffsetFlags {
    pub const NONE: OffsetFlags = OffsetFlags {
        gecko_reg: false,
        ptr_or_base_addr: false,
        add_to: false,
    };
    pub const GECKO_REG: OffsetFlags = OffsetFlags {
        gecko_reg: true,
        ptr_or_base_addr: false,
        add_to: false,
    };
    pub const PTR_OR_BASE_ADDR: OffsetFlags = OffsetFlags {
        gecko_reg: false,
        ptr_or_base_addr: true,
        add_to: false,
    };
    pub const ADD_TO: OffsetFlags = OffsetFlags {
        gecko_reg: false,
        ptr_or_base_addr: false,
        add_to: true,
    };
}

impl BitOr for OffsetFlags {
    type Output = OffsetFlags;

    fn bitor(self, rhs: OffsetFlags) -> OffsetFlags {
        OffsetFlags {
            gecko_reg: self.gecko_reg || rhs.gecko_reg,
            ptr_or_base_addr: self.ptr_or_base_addr || rhs.ptr_or_base_addr,
            add_to: self.add_to || rhs.add_to,
        }
    }
}

/// Flags of the counter-if code type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterFlags {
    pub invert: bool,
    pub endif: bool,
}

impl CounterFlags {
    pub const NONE: CounterFlags = CounterFlags {
        invert: false,
        endif: false,
    };
    pub const INVERT: CounterFlags = CounterFlags {
        invert: true,
        endif: false,
    };
    pub const ENDIF: CounterFlags = CounterFlags {
        invert: false,
        endif: true,
    };
}

impl BitOr for CounterFlags {
    type Output = CounterFlags;

    fn bitor(self, rhs: CounterFlags) -> CounterFlags {
        CounterFlags {
            invert: self.invert || rhs.invert,
            endif: self.endif || rhs.endif,
        }
    }
}

/// A single patch code, one variant per operation shape.
///
/// Every variant carries only the fields its encoding can represent; the
/// bit layout lives in one place, the `encode` match. A `None` register is
/// the "no register" selector and triggers the per-family substitution
/// rules at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code<'a> {
    // CT0: memory writes
    Write8 {
        addr: u32,
        val: u8,
        extra: u16,
        flags: CodeFlags,
    },
    Write16 {
        addr: u32,
        val: u16,
        extra: u16,
        flags: CodeFlags,
    },
    Write32 {
        addr: u32,
        val: u32,
        flags: CodeFlags,
    },
    WriteString {
        addr: u32,
        data: &'a [u8],
        flags: CodeFlags,
    },
    WriteSerial {
        width: SerialWidth,
        addr: u32,
        val: u32,
        count: u16,
        addr_step: u16,
        val_step: u32,
        flags: CodeFlags,
    },

    // CT1: compare memory against an immediate
    If32 {
        cmp: Compare,
        addr: u32,
        val: u32,
        endif: bool,
        flags: CodeFlags,
    },
    If16 {
        cmp: Compare,
        addr: u32,
        val: u16,
        mask: u16,
        endif: bool,
        flags: CodeFlags,
    },

    // CT2: base address / pointer offset
    AnchorOp {
        anchor: Anchor,
        action: AnchorAction,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    },
    AnchorToCode {
        anchor: Anchor,
        offs: i16,
    },

    // CT3: control flow over block slots
    SetRepeat {
        count: u16,
        block: Option<Block>,
    },
    ExecuteRepeat {
        block: Option<Block>,
    },
    Return {
        status: ExecStatus,
        block: Option<Block>,
    },
    Goto {
        status: ExecStatus,
        offs: i16,
    },
    Gosub {
        status: ExecStatus,
        offs: i16,
        block: Option<Block>,
    },

    // CT4: gecko registers
    SetReg {
        reg: Option<GeckoReg>,
        val: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    },
    LoadReg {
        reg: Option<GeckoReg>,
        width: RegWidth,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    },
    StoreReg {
        reg: Option<GeckoReg>,
        width: RegWidth,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    },
    RegDirectOp {
        op: RegOp,
        reg: Option<GeckoReg>,
        refs: RegOpRef,
        val: u32,
    },
    RegRegOp {
        op: RegOp,
        dst: Option<GeckoReg>,
        src: Option<GeckoReg>,
        refs: RegOpRef,
    },
    CopyRegToMem {
        src: Option<GeckoReg>,
        anchor_reg: Option<GeckoReg>,
        addr: u32,
        count: u16,
        flags: CodeFlags,
    },
    CopyMemToReg {
        anchor_reg: Option<GeckoReg>,
        dst: Option<GeckoReg>,
        addr: u32,
        count: u16,
        flags: CodeFlags,
    },

    // CT5: register and counter compares
    IfReg16 {
        cmp: Compare,
        left: Option<GeckoReg>,
        right: Option<GeckoReg>,
        addr: u32,
        mask: u16,
        endif: bool,
        flags: CodeFlags,
    },
    IfCounter16 {
        cmp: Compare,
        counter: u16,
        max: u16,
        mask: u16,
        cflags: CounterFlags,
    },

    // CT6: misc
    ExecuteAsm {
        words: &'a [u32],
    },
    InsertAsm {
        addr: u32,
        words: &'a [u32],
        flags: CodeFlags,
    },
    CreateBranch {
        addr: u32,
        target: u32,
        flags: CodeFlags,
    },
    Switch,
    RangeCheck {
        start: u16,
        end: u16,
        endif: bool,
        flags: CodeFlags,
    },

    // CT7: terminators
    FullTerminator {
        ba: u16,
        po: u16,
    },
    Endif {
        count: u16,
        do_else: bool,
        ba: u16,
        po: u16,
    },
    EndOfCodeList,
}
