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

// Line offsets are relative to the current line, as returned by
// `label_offset`. A missing block selects slot 0.

use std::io::Write;

use crate::code::*;
use crate::emitter::CodeBuilder;
use crate::errors::CodegenError;

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// Arms block `block` to repeat the following codes `count` times.
    pub fn set_repeat(&mut self, count: u16, block: Option<Block>) -> Result<(), CodegenError> {
        self.emit(Code::SetRepeat { count, block })
    }

    /// Jumps back to block `block`'s armed line while its count lasts.
    pub fn execute_repeat(&mut self, block: Option<Block>) -> Result<(), CodegenError> {
        self.emit(Code::ExecuteRepeat { block })
    }

    /// Returns to the line saved in block `block` when the execution
    /// status matches.
    pub fn ret(&mut self, status: ExecStatus, block: Option<Block>) -> Result<(), CodegenError> {
        self.emit(Code::Return { status, block })
    }

    /// Jumps `offs` lines when the execution status matches.
    pub fn goto(&mut self, status: ExecStatus, offs: i16) -> Result<(), CodegenError> {
        self.emit(Code::Goto { status, offs })
    }

    /// Jumps `offs` lines, saving the return line in block `block`, when
    /// the execution status matches.
    pub fn gosub(
        &mut self,
        status: ExecStatus,
        offs: i16,
        block: Option<Block>,
    ) -> Result<(), CodegenError> {
        self.emit(Code::Gosub {
            status,
            offs,
            block,
        })
    }
}
