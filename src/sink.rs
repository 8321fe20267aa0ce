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

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

/// The output endpoint for an encoded code list.
///
/// A sink renders in one of two modes chosen at construction: text mode
/// produces uppercase hex, one 64-bit code line per text line; binary mode
/// packs the same words big-endian with no framing in between.
pub struct CodeSink<W: Write> {
    out: W,
    binary: bool,
}

impl<W: Write> CodeSink<W> {
    pub fn new(out: W, binary: bool) -> Self {
        CodeSink { out, binary }
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Direct access to the underlying writer, for envelope text that is
    /// not part of the encoded stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one code line: the header word followed by the payload word.
    pub fn write_code_line(&mut self, header: u32, payload: u32) -> io::Result<()> {
        if self.binary {
            self.out.write_u32::<BigEndian>(header)?;
            self.out.write_u32::<BigEndian>(payload)
        } else {
            writeln!(self.out, "{:08X} {:08X}", header, payload)
        }
    }

    /// Writes a string payload. In text mode bytes are grouped four per
    /// space-separated group and eight per line; a trailing partial line
    /// still ends with a newline.
    pub fn write_payload_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.binary {
            return self.out.write_all(bytes);
        }

        for (i, byte) in bytes.iter().enumerate() {
            write!(self.out, "{:02X}", byte)?;

            let idx = i + 1;
            if idx < bytes.len() {
                if idx % 8 == 0 {
                    writeln!(self.out)?;
                } else if idx % 4 == 0 {
                    write!(self.out, " ")?;
                }
            } else {
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Writes an assembly payload. In text mode words are grouped two per
    /// line, separated by a single space.
    pub fn write_payload_words(&mut self, words: &[u32]) -> io::Result<()> {
        if self.binary {
            for word in words {
                self.out.write_u32::<BigEndian>(*word)?;
            }
            return Ok(());
        }

        for (i, word) in words.iter().enumerate() {
            write!(self.out, "{:08X}", word)?;

            let idx = i + 1;
            if idx < words.len() {
                if idx % 2 == 0 {
                    writeln!(self.out)?;
                } else {
                    write!(self.out, " ")?;
                }
            } else {
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_sink() -> CodeSink<Vec<u8>> {
        CodeSink::new(Vec::new(), false)
    }

    fn binary_sink() -> CodeSink<Vec<u8>> {
        CodeSink::new(Vec::new(), true)
    }

    #[test]
    fn test_text_code_line() {
        let mut sink = text_sink();
        sink.write_code_line(0x043F3D44, 0x00000000).unwrap();
        assert_eq!(sink.into_inner(), b"043F3D44 00000000\n");
    }

    #[test]
    fn test_text_code_line_uppercase() {
        let mut sink = text_sink();
        sink.write_code_line(0xDEADBEEF, 0x0000CAFE).unwrap();
        assert_eq!(sink.into_inner(), b"DEADBEEF 0000CAFE\n");
    }

    #[test]
    fn test_binary_code_line_is_big_endian() {
        let mut sink = binary_sink();
        sink.write_code_line(0x04001820, 0x000000AA).unwrap();
        assert_eq!(
            sink.into_inner(),
            vec![0x04, 0x00, 0x18, 0x20, 0x00, 0x00, 0x00, 0xAA]
        );
    }

    #[test]
    fn test_text_byte_payload_single_line() {
        let mut sink = text_sink();
        sink.write_payload_bytes(&[0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48])
            .unwrap();
        assert_eq!(sink.into_inner(), b"41424344 45464748\n");
    }

    #[test]
    fn test_text_byte_payload_two_lines() {
        let mut sink = text_sink();
        let bytes: Vec<u8> = (1..=16).collect();
        sink.write_payload_bytes(&bytes).unwrap();
        assert_eq!(
            sink.into_inner(),
            b"01020304 05060708\n090A0B0C 0D0E0F10\n"
        );
    }

    #[test]
    fn test_text_byte_payload_empty() {
        let mut sink = text_sink();
        sink.write_payload_bytes(&[]).unwrap();
        assert_eq!(sink.into_inner(), b"");
    }

    #[test]
    fn test_binary_byte_payload_is_raw() {
        let mut sink = binary_sink();
        sink.write_payload_bytes(&[0xDE, 0xAD, 0x00]).unwrap();
        assert_eq!(sink.into_inner(), vec![0xDE, 0xAD, 0x00]);
    }

    #[test]
    fn test_text_word_payload_pairs_per_line() {
        let mut sink = text_sink();
        sink.write_payload_words(&[0x3DC08000, 0x81829000, 0x4E800020, 0x00000000])
            .unwrap();
        assert_eq!(
            sink.into_inner(),
            b"3DC08000 81829000\n4E800020 00000000\n"
        );
    }

    #[test]
    fn test_binary_word_payload_is_big_endian() {
        let mut sink = binary_sink();
        sink.write_payload_words(&[0x60000000, 0x00000000]).unwrap();
        assert_eq!(
            sink.into_inner(),
            vec![0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }
}
