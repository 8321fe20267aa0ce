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
    /// Writes one byte at `addr`.
    pub fn write8(&mut self, addr: u32, val: u8, flags: CodeFlags) -> Result<(), CodegenError> {
        self.emit(Code::Write8 {
            addr,
            val,
            extra: 0,
            flags,
        })
    }

    /// Writes one byte at `addr`, replayed `extra` additional times in
    /// place by the handler.
    pub fn write8_extra(
        &mut self,
        addr: u32,
        val: u8,
        extra: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::Write8 {
            addr,
            val,
            extra,
            flags,
        })
    }

    /// Writes one halfword at `addr`.
    pub fn write16(&mut self, addr: u32, val: u16, flags: CodeFlags) -> Result<(), CodegenError> {
        self.emit(Code::Write16 {
            addr,
            val,
            extra: 0,
            flags,
        })
    }

    pub fn write16_extra(
        &mut self,
        addr: u32,
        val: u16,
        extra: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::Write16 {
            addr,
            val,
            extra,
            flags,
        })
    }

    /// Writes one word at `addr`.
    pub fn write32(&mut self, addr: u32, val: u32, flags: CodeFlags) -> Result<(), CodegenError> {
        self.emit(Code::Write32 { addr, val, flags })
    }

    /// Writes `data` verbatim starting at `addr`. The payload occupies
    /// whole 8-byte lines in the code list, zero padded.
    pub fn write_string(
        &mut self,
        addr: u32,
        data: &[u8],
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::WriteString { addr, data, flags })
    }

    /// Writes `count` bytes, stepping the address by `addr_step` and the
    /// value by `val_step` each time. A count of zero behaves as one.
    pub fn write_serial8(
        &mut self,
        addr: u32,
        val: u8,
        count: u16,
        addr_step: u16,
        val_step: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::WriteSerial {
            width: SerialWidth::W8,
            addr,
            val: val as u32,
            count,
            addr_step,
            val_step,
            flags,
        })
    }

    pub fn write_serial16(
        &mut self,
        addr: u32,
        val: u16,
        count: u16,
        addr_step: u16,
        val_step: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::WriteSerial {
            width: SerialWidth::W16,
            addr,
            val: val as u32,
            count,
            addr_step,
            val_step,
            flags,
        })
    }

    pub fn write_serial32(
        &mut self,
        addr: u32,
        val: u32,
        count: u16,
        addr_step: u16,
        val_step: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::WriteSerial {
            width: SerialWidth::W32,
            addr,
            val,
            count,
            addr_step,
            val_step,
            flags,
        })
    }
}
