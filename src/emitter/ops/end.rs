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

// The `_ba_po` variants reload the high halves of both anchors from the
// payload; zeroes leave them untouched.

use std::io::Write;

use crate::code::*;
use crate::emitter::CodeBuilder;
use crate::errors::CodegenError;

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// Closes every open conditional and clears the execution status.
    pub fn full_terminator(&mut self) -> Result<(), CodegenError> {
        self.emit(Code::FullTerminator { ba: 0, po: 0 })
    }

    pub fn full_terminator_ba_po(&mut self, ba: u16, po: u16) -> Result<(), CodegenError> {
        self.emit(Code::FullTerminator { ba, po })
    }

    /// Closes the innermost open conditional.
    pub fn endif(&mut self) -> Result<(), CodegenError> {
        self.endifs(1)
    }

    pub fn endif_ba_po(&mut self, ba: u16, po: u16) -> Result<(), CodegenError> {
        self.endifs_ba_po(ba, po, 1)
    }

    /// Closes the `count` innermost open conditionals.
    pub fn endifs(&mut self, count: u16) -> Result<(), CodegenError> {
        self.endifs_ba_po(0, 0, count)
    }

    pub fn endifs_ba_po(&mut self, ba: u16, po: u16, count: u16) -> Result<(), CodegenError> {
        self.emit(Code::Endif {
            count,
            do_else: false,
            ba,
            po,
        })
    }

    /// Closes the innermost open conditional and inverts the execution
    /// status, taking the other arm.
    pub fn endif_else(&mut self) -> Result<(), CodegenError> {
        self.endifs_else(1)
    }

    pub fn endif_ba_po_else(&mut self, ba: u16, po: u16) -> Result<(), CodegenError> {
        self.endifs_ba_po_else(ba, po, 1)
    }

    pub fn endifs_else(&mut self, count: u16) -> Result<(), CodegenError> {
        self.endifs_ba_po_else(0, 0, count)
    }

    pub fn endifs_ba_po_else(&mut self, ba: u16, po: u16, count: u16) -> Result<(), CodegenError> {
        self.emit(Code::Endif {
            count,
            do_else: true,
            ba,
            po,
        })
    }
}
