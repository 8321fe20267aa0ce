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

// All compares are unsigned. A nonzero mask is applied by the handler as
// `*addr & !mask OP val`. The endif-first variants close the innermost
// open conditional before testing.

use std::io::Write;

use crate::code::*;
use crate::emitter::CodeBuilder;
use crate::errors::CodegenError;

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// Compares the 32-bit cell at `addr` against `val`.
    pub fn if32(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::If32 {
            cmp,
            addr,
            val,
            endif: false,
            flags,
        })
    }

    pub fn endif_if32(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::If32 {
            cmp,
            addr,
            val,
            endif: true,
            flags,
        })
    }

    /// Compares the 16-bit cell at `addr` against `val`.
    pub fn if16(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.if16_masked(cmp, addr, val, 0, flags)
    }

    pub fn endif_if16(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.endif_if16_masked(cmp, addr, val, 0, flags)
    }

    pub fn if16_masked(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u16,
        mask: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::If16 {
            cmp,
            addr,
            val,
            mask,
            endif: false,
            flags,
        })
    }

    pub fn endif_if16_masked(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u16,
        mask: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::If16 {
            cmp,
            addr,
            val,
            mask,
            endif: true,
            flags,
        })
    }

    /// Compares the byte at `addr` against `val`, lowered onto a 16-bit
    /// compare of the cell at `addr - 1` with the upper byte masked off.
    /// `addr` must be the odd half of an aligned 16-bit cell for the read
    /// to land where expected.
    pub fn if8(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u8,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.if16_masked(cmp, addr.wrapping_sub(1), val as u16, 0xFF00, flags)
    }

    pub fn endif_if8(
        &mut self,
        cmp: Compare,
        addr: u32,
        val: u8,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.endif_if16_masked(cmp, addr.wrapping_sub(1), val as u16, 0xFF00, flags)
    }
}
