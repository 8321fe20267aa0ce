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

// All compares are unsigned over the low 16 bits, masked at runtime as
// `x & !mask OP y & !mask`. Register 15 is never a valid operand; it
// names the anchored memory cell.

use std::io::Write;

use crate::code::*;
use crate::emitter::CodeBuilder;
use crate::errors::CodegenError;

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// Compares two gecko registers.
    pub fn if_reg16(
        &mut self,
        cmp: Compare,
        left: GeckoReg,
        right: GeckoReg,
        mask: u16,
    ) -> Result<(), CodegenError> {
        self.emit(Code::IfReg16 {
            cmp,
            left: Some(left),
            right: Some(right),
            addr: 0,
            mask,
            endif: false,
            flags: CodeFlags::NONE,
        })
    }

    pub fn endif_if_reg16(
        &mut self,
        cmp: Compare,
        left: GeckoReg,
        right: GeckoReg,
        mask: u16,
    ) -> Result<(), CodegenError> {
        self.emit(Code::IfReg16 {
            cmp,
            left: Some(left),
            right: Some(right),
            addr: 0,
            mask,
            endif: true,
            flags: CodeFlags::NONE,
        })
    }

    /// Compares a gecko register against the 16-bit cell at the anchored
    /// address.
    pub fn if_reg16_mem(
        &mut self,
        cmp: Compare,
        reg: GeckoReg,
        addr: u32,
        mask: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::IfReg16 {
            cmp,
            left: Some(reg),
            right: None,
            addr,
            mask,
            endif: false,
            flags,
        })
    }

    pub fn endif_if_reg16_mem(
        &mut self,
        cmp: Compare,
        reg: GeckoReg,
        addr: u32,
        mask: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::IfReg16 {
            cmp,
            left: Some(reg),
            right: None,
            addr,
            mask,
            endif: true,
            flags,
        })
    }

    /// Compares the handler's counter, stored inside this very line in the
    /// code list, against `max`.
    pub fn if_counter16(
        &mut self,
        cmp: Compare,
        counter: u16,
        max: u16,
        mask: u16,
        cflags: CounterFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::IfCounter16 {
            cmp,
            counter,
            max,
            mask,
            cflags,
        })
    }
}
