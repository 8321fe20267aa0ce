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

use std::io::Write;

use crate::code::*;
use crate::emitter::CodeBuilder;
use crate::errors::CodegenError;

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// ba = *(anchor + addr), optionally offset by a gecko register.
    pub fn load_base_addr(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::BaseAddress, AnchorAction::Load, addr, reg, off, flags)
    }

    /// ba = addr (or ba += addr with the add-to offset flag).
    pub fn set_base_addr(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::BaseAddress, AnchorAction::Set, addr, reg, off, flags)
    }

    /// *(anchor + addr) = ba.
    pub fn store_base_addr(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::BaseAddress, AnchorAction::Store, addr, reg, off, flags)
    }

    /// po = *(anchor + addr), optionally offset by a gecko register.
    pub fn load_pointer(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::PointerOffset, AnchorAction::Load, addr, reg, off, flags)
    }

    /// po = addr (or po += addr with the add-to offset flag).
    pub fn set_pointer(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::PointerOffset, AnchorAction::Set, addr, reg, off, flags)
    }

    /// *(anchor + addr) = po.
    pub fn store_pointer(
        &mut self,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.anchor_op(Anchor::PointerOffset, AnchorAction::Store, addr, reg, off, flags)
    }

    /// ba = address of the code line `offs` lines away.
    pub fn set_base_addr_to_code_line(&mut self, offs: i16) -> Result<(), CodegenError> {
        self.emit(Code::AnchorToCode {
            anchor: Anchor::BaseAddress,
            offs,
        })
    }

    /// po = address of the code line `offs` lines away.
    pub fn set_pointer_to_code_line(&mut self, offs: i16) -> Result<(), CodegenError> {
        self.emit(Code::AnchorToCode {
            anchor: Anchor::PointerOffset,
            offs,
        })
    }

    /// A line with no effect: po += 0.
    pub fn nop(&mut self) -> Result<(), CodegenError> {
        self.set_pointer(
            0,
            None,
            OffsetFlags::PTR_OR_BASE_ADDR,
            CodeFlags::USE_POINTER,
        )
    }

    fn anchor_op(
        &mut self,
        anchor: Anchor,
        action: AnchorAction,
        addr: u32,
        reg: Option<GeckoReg>,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::AnchorOp {
            anchor,
            action,
            addr,
            reg,
            off,
            flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{HandlerLayout, run_passes};
    use crate::sink::CodeSink;

    #[test]
    fn test_nop_is_po_add_zero() {
        let mut sink = CodeSink::new(Vec::new(), false);
        run_passes(&mut sink, HandlerLayout::DOLPHIN, |b| b.nop()).unwrap();
        assert_eq!(sink.into_inner(), b"5A010000 00000000\n");
    }
}
