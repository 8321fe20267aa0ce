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
    /// Runs `words` as PowerPC machine code once. The blob must end with
    /// `blr` (0x4E800020); the handler jumps straight into it.
    pub fn execute_asm(&mut self, words: &[u32]) -> Result<(), CodegenError> {
        self.emit(Code::ExecuteAsm { words })
    }

    /// Replaces the instruction at the anchored address with a branch into
    /// `words`, branching back afterwards. The terminator word and, for
    /// even-length blobs, a leading `nop` are appended automatically.
    pub fn insert_asm(
        &mut self,
        addr: u32,
        words: &[u32],
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::InsertAsm { addr, words, flags })
    }

    /// Writes a branch instruction at the anchored address aimed at
    /// `target`.
    pub fn create_branch(
        &mut self,
        addr: u32,
        target: u32,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::CreateBranch {
            addr,
            target,
            flags,
        })
    }

    /// Toggles which of the two code lists the handler walks.
    pub fn switch(&mut self) -> Result<(), CodegenError> {
        self.emit(Code::Switch)
    }

    /// Tests whether the active anchor sits inside `[start0000, end0000)`.
    pub fn range_check(
        &mut self,
        start: u16,
        end: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::RangeCheck {
            start,
            end,
            endif: false,
            flags,
        })
    }

    pub fn endif_range_check(
        &mut self,
        start: u16,
        end: u16,
        flags: CodeFlags,
    ) -> Result<(), CodegenError> {
        self.emit(Code::RangeCheck {
            start,
            end,
            endif: true,
            flags,
        })
    }
}
