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
    /// reg = val (or reg += val with the add-to offset flag).
    pub fn set_reg(
        &mut self,
        reg: GeckoReg,
        val: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::SetReg {
            reg: Some(reg),
            val,
            off,
            flags,
        })
    }

    /// reg = *(anchor + addr), one byte.
    pub fn load_reg8(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.load_reg(reg, RegWidth::W8, addr, off, flags)
    }

    pub fn load_reg16(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.load_reg(reg, RegWidth::W16, addr, off, flags)
    }

    pub fn load_reg32(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.load_reg(reg, RegWidth::W32, addr, off, flags)
    }

    /// *(anchor + addr) = reg, one byte.
    pub fn store_reg8(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.store_reg(reg, RegWidth::W8, addr, off, flags)
    }

    pub fn store_reg16(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.store_reg(reg, RegWidth::W16, addr, off, flags)
    }

    pub fn store_reg32(
        &mut self,
        reg: GeckoReg,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.store_reg(reg, RegWidth::W32, addr, off, flags)
    }

    /// reg = reg OP val, with each operand optionally dereferenced first.
    pub fn reg_direct_op(
        &mut self,
        op: RegOp,
        reg: GeckoReg,
        refs: RegOpRef,
        val: u32,
    ) -> Result<(), CodegenError> {
        self.emit(Code::RegDirectOp {
            op,
            reg: Some(reg),
            refs,
            val,
        })
    }

    /// dst = dst OP src, with each operand optionally dereferenced first.
    pub fn reg_op(
        &mut self,
        op: RegOp,
        dst: GeckoReg,
        src: GeckoReg,
        refs: RegOpRef,
    ) -> Result<(), CodegenError> {
        self.emit(Code::RegRegOp {
            op,
            dst: Some(dst),
            src: Some(src),
            refs,
        })
    }

    /// Copies `count` bytes from *src to the anchored address, optionally
    /// rebased on *anchor_reg. No anchor register targets the anchor
    /// itself.
    pub fn copy_reg_to_mem(
        &mut self,
        src: GeckoReg,
        anchor_reg: Option<GeckoReg>,
        addr: u32,
        count: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::CopyRegToMem {
            src: Some(src),
            anchor_reg,
            addr,
            count,
            flags,
        })
    }

    /// Copies `count` bytes from the anchored address, optionally rebased
    /// on *anchor_reg, to *dst.
    pub fn copy_mem_to_reg(
        &mut self,
        dst: GeckoReg,
        anchor_reg: Option<GeckoReg>,
        addr: u32,
        count: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::CopyMemToReg {
            anchor_reg,
            dst: Some(dst),
            addr,
            count,
            flags,
        })
    }

    fn load_reg(
        &mut self,
        reg: GeckoReg,
        width: RegWidth,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::LoadReg {
            reg: Some(reg),
            width,
            addr,
            off,
            flags,
        })
    }

    fn store_reg(
        &mut self,
        reg: GeckoReg,
        width: RegWidth,
        addr: u32,
        off: OffsetFlags,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::StoreReg {
            reg: Some(reg),
            width,
            addr,
            off,
            flags,
        })
    }
}
