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

use crate::code::Code;
use crate::emitter::constants::*;
use crate::emitter::{CodeBuilder, HandlerLayout, encode, run_passes};
use crate::errors::CodegenError;
use crate::sink::CodeSink;

/// The supported code list envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// INI code list, as Dolphin Emulator reads it.
    Dolphin,
    /// Binary code list for real-hardware loaders (Nintendont and the
    /// like).
    Gct,
    /// Text code list understood by many code managers.
    Ocarina,
    /// Bare binary words, no framing.
    Raw,
    /// Bare text lines, no framing.
    RawText,
}

impl ListFormat {
    pub fn is_binary(self) -> bool {
        matches!(self, ListFormat::Gct | ListFormat::Raw)
    }
}

/// Name, author, and description lines shown by code managers.
#[derive(Debug, Clone, Copy)]
pub struct CodeMeta<'a> {
    pub name: &'a str,
    pub author: &'a str,
    pub description: &'a [&'a str],
}

/// Renders one code body inside the chosen envelope.
///
/// The sink mode follows the format; the prelude and postlude frame
/// whatever the body emits. Returns the writer for the caller to flush or
/// inspect.
pub fn write_codelist<W, F>(
    out: W,
    format: ListFormat,
    layout: HandlerLayout,
    meta: &CodeMeta,
    body: F,
) -> Result<W, CodegenError>
where
    W: Write,
    F: FnMut(&mut CodeBuilder<'_, W>) -> Result<(), CodegenError>,
{
    let mut sink = CodeSink::new(out, format.is_binary());

    match format {
        ListFormat::Dolphin => {
            writeln!(sink.get_mut(), "${} [{}]", meta.name, meta.author)?;
            for line in meta.description {
                writeln!(sink.get_mut(), "*{}", line)?;
            }
        }
        ListFormat::Gct | ListFormat::Ocarina => {
            sink.write_code_line(GCT_MAGIC, GCT_MAGIC)?;
        }
        ListFormat::Raw | ListFormat::RawText => {}
    }

    run_passes(&mut sink, layout, body)?;

    if matches!(format, ListFormat::Gct | ListFormat::Ocarina) {
        let (header, payload) = encode::encode(&Code::EndOfCodeList);
        sink.write_code_line(header, payload)?;
    }

    Ok(sink.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: CodeMeta = CodeMeta {
        name: "Test Code",
        author: "nobody",
        description: &[],
    };

    fn terminator_only(
        b: &mut CodeBuilder<'_, Vec<u8>>,
    ) -> Result<(), CodegenError> {
        b.full_terminator()
    }

    #[test]
    fn test_gct_framing() {
        let out = write_codelist(
            Vec::new(),
            ListFormat::Gct,
            HandlerLayout::DOLPHIN,
            &META,
            terminator_only,
        )
        .unwrap();
        assert_eq!(
            out,
            vec![
                0x00, 0xD0, 0xC0, 0xDE, 0x00, 0xD0, 0xC0, 0xDE, // magic
                0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // terminator
                0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // end of list
            ]
        );
    }

    #[test]
    fn test_ocarina_framing_is_text() {
        let out = write_codelist(
            Vec::new(),
            ListFormat::Ocarina,
            HandlerLayout::DOLPHIN,
            &META,
            terminator_only,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "00D0C0DE 00D0C0DE\nE0000000 00000000\nF0000000 00000000\n"
        );
    }

    #[test]
    fn test_dolphin_prelude() {
        let meta = CodeMeta {
            name: "Some Code",
            author: "Yonder",
            description: &["First note.", "Second note."],
        };
        let out = write_codelist(
            Vec::new(),
            ListFormat::Dolphin,
            HandlerLayout::DOLPHIN,
            &meta,
            terminator_only,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "$Some Code [Yonder]\n*First note.\n*Second note.\nE0000000 00000000\n"
        );
    }

    #[test]
    fn test_raw_has_no_framing() {
        let out = write_codelist(
            Vec::new(),
            ListFormat::Raw,
            HandlerLayout::DOLPHIN,
            &META,
            terminator_only,
        )
        .unwrap();
        assert_eq!(out, vec![0xE0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_rawtext_has_no_framing() {
        let out = write_codelist(
            Vec::new(),
            ListFormat::RawText,
            HandlerLayout::DOLPHIN,
            &META,
            terminator_only,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "E0000000 00000000\n");
    }
}
