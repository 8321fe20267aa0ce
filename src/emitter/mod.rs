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

pub mod constants;
pub(crate) mod encode;
mod ops;

use std::io::Write;

use crate::code::Code;
use crate::emitter::constants::*;
use crate::errors::CodegenError;
use crate::sink::CodeSink;

/// Where the code handler lives on the target, which determines the
/// runtime address of every emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerLayout {
    /// Hook address of the handler binary.
    pub address: u32,
    /// Size of the handler binary; the code list starts right after it.
    pub size: u32,
    /// Whether line-pointer queries are meaningful for this handler. A
    /// layout with an unknown binary size cannot support them.
    pub line_pointers: bool,
}

impl HandlerLayout {
    /// The layout Dolphin hooks its bundled code handler at.
    pub const DOLPHIN: HandlerLayout = HandlerLayout {
        address: HANDLER_HOOK_ADDR,
        size: HANDLER_BIN_SIZE,
        line_pointers: true,
    };

    pub fn without_line_pointers(self) -> HandlerLayout {
        HandlerLayout {
            line_pointers: false,
            ..self
        }
    }

    /// Runtime address of the first code-list line, in embeddable form.
    fn code_list_start(&self) -> u32 {
        (self.address & EMBED_ADDR_MASK) + self.size
    }
}

impl Default for HandlerLayout {
    fn default() -> Self {
        HandlerLayout::DOLPHIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Collects label line numbers; nothing reaches the sink.
    Labels,
    /// Collects line pointers; nothing reaches the sink.
    Pointers,
    /// Renders every code to the sink.
    Emit,
}

/// Handle to a label slot. Labels resolve to line indices on the first
/// pass and answer offset queries on later ones.
#[derive(Debug, Clone, Copy)]
pub struct Label(usize);

/// The per-pass emit context handed to a code body.
///
/// Each emitter method advances the line counters on every pass but only
/// touches the sink on the final one, which is what lets a body query
/// labels and line pointers it defines further down.
pub struct CodeBuilder<'a, W: Write> {
    sink: &'a mut CodeSink<W>,
    layout: HandlerLayout,
    pass: Pass,
    lbl_line: i32,
    ptr_line: u32,
    labels: Vec<i32>,
    next_label: usize,
}

impl<'a, W: Write> CodeBuilder<'a, W> {
    /// Declares a label slot. Declarations must run unconditionally and in
    /// the same order on every pass; the slot index is their identity.
    pub fn declare_label(&mut self) -> Label {
        let id = self.next_label;
        self.next_label += 1;
        if id == self.labels.len() {
            self.labels.push(0);
        }
        Label(id)
    }

    /// Pins a label to the current line. Only the first pass records it;
    /// later passes see the stable value.
    pub fn define_label(&mut self, label: Label) {
        if self.pass == Pass::Labels {
            self.labels[label.0] = self.lbl_line;
        }
    }

    /// Signed distance in lines from the current line to the label,
    /// positive for forward targets. Returns 0 while labels are still
    /// being collected.
    pub fn label_offset(&self, label: Label) -> i16 {
        if self.pass == Pass::Labels {
            return 0;
        }
        (self.labels[label.0] - self.lbl_line) as i16
    }

    /// Absolute runtime address the next emitted line will occupy.
    /// Returns 0 while line pointers are still being collected.
    pub fn line_pointer(&self) -> u32 {
        if self.pass == Pass::Pointers {
            return 0;
        }
        self.layout.code_list_start() + self.ptr_line * 8
    }

    /// Renders one code, advancing the line counters on every pass and
    /// writing on the emit pass only.
    pub fn emit(&mut self, code: Code) -> Result<(), CodegenError> {
        // A serial write occupies two lines; everything else one, with
        // string/assembly bodies riding along as payload.
        let span = match code {
            Code::WriteSerial { .. } => 2,
            _ => 1,
        };
        self.lbl_line += span;
        self.ptr_line += span as u32;

        if self.pass != Pass::Emit {
            return Ok(());
        }

        let (header, payload) = encode::encode(&code);
        self.sink.write_code_line(header, payload)?;

        match code {
            Code::WriteSerial {
                width,
                count,
                addr_step,
                val_step,
                ..
            } => {
                let (header, payload) =
                    encode::encode_serial_step(width, count, addr_step, val_step);
                self.sink.write_code_line(header, payload)?;
            }
            Code::WriteString { data, .. } => {
                self.sink.write_payload_bytes(&encode::string_payload(data))?;
            }
            Code::ExecuteAsm { words } => {
                self.sink
                    .write_payload_words(&encode::execute_asm_payload(words))?;
            }
            Code::InsertAsm { words, .. } => {
                self.sink
                    .write_payload_words(&encode::insert_asm_payload(words))?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Runs a code body to completion: label pass, line-pointer pass (when the
/// layout supports line pointers), then the emit pass. The body must be
/// deterministic; every pass has to see the same call sequence.
///
/// Fails before anything reaches the sink if the body emits more lines
/// than the code handler accepts.
pub fn run_passes<W, F>(
    sink: &mut CodeSink<W>,
    layout: HandlerLayout,
    mut body: F,
) -> Result<(), CodegenError>
where
    W: Write,
    F: FnMut(&mut CodeBuilder<'_, W>) -> Result<(), CodegenError>,
{
    let passes: &[Pass] = if layout.line_pointers {
        &[Pass::Labels, Pass::Pointers, Pass::Emit]
    } else {
        &[Pass::Labels, Pass::Emit]
    };

    let mut labels: Vec<i32> = Vec::new();
    for &pass in passes {
        let mut builder = CodeBuilder {
            sink: &mut *sink,
            layout,
            pass,
            lbl_line: 0,
            ptr_line: 0,
            labels,
            next_label: 0,
        };
        body(&mut builder)?;

        let lines = builder.lbl_line as u32;
        labels = builder.labels;

        if pass == Pass::Labels && lines > MAX_CODE_LINES {
            return Err(CodegenError::TooManyLines {
                lines,
                limit: MAX_CODE_LINES,
            });
        }
    }
    Ok(())
}
