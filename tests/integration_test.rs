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

use std::io::{Read, Seek, SeekFrom};

use geckasm::code::*;
use geckasm::emitter::constants::{MAX_CODE_LINES, RANGE_BASE, RANGE_STACK};
use geckasm::emitter::{CodeBuilder, HandlerLayout};
use geckasm::errors::CodegenError;
use geckasm::listing::{CodeMeta, ListFormat, write_codelist};

const META: CodeMeta = CodeMeta {
    name: "Test Code",
    author: "nobody",
    description: &[],
};

fn render<F>(format: ListFormat, body: F) -> Vec<u8>
where
    F: FnMut(&mut CodeBuilder<'_, Vec<u8>>) -> Result<(), CodegenError>,
{
    write_codelist(Vec::new(), format, HandlerLayout::DOLPHIN, &META, body).unwrap()
}

fn render_text<F>(format: ListFormat, body: F) -> String
where
    F: FnMut(&mut CodeBuilder<'_, Vec<u8>>) -> Result<(), CodegenError>,
{
    String::from_utf8(render(format, body)).unwrap()
}

#[test]
fn test_word_write_at_base_address() {
    let out = render_text(ListFormat::RawText, |b| {
        b.write32(0x003F3D44, 0, CodeFlags::NONE)
    });
    assert_eq!(out, "043F3D44 00000000\n");
}

#[test]
fn test_byte_compare_lowers_onto_masked_halfword() {
    let out = render_text(ListFormat::RawText, |b| {
        b.if8(Compare::Equal, 0x00000007, 0x00, CodeFlags::NONE)
    });
    assert_eq!(out, "28000006 FF000000\n");
}

#[test]
fn test_goto_if_false_over_forward_label() {
    let out = render_text(ListFormat::RawText, |b| {
        let end = b.declare_label();
        let offs = b.label_offset(end);
        b.goto(ExecStatus::False, offs)?;
        b.write32(0, 0, CodeFlags::NONE)?;
        b.define_label(end);
        b.full_terminator()
    });
    assert_eq!(
        out,
        "66100001 00000000\n04000000 00000000\nE0000000 00000000\n"
    );
}

#[test]
fn test_gct_envelope_around_full_terminator() {
    let out = render(ListFormat::Gct, |b| b.full_terminator());
    assert_eq!(
        out,
        vec![
            0x00, 0xD0, 0xC0, 0xDE, 0x00, 0xD0, 0xC0, 0xDE, //
            0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        ]
    );
}

#[test]
fn test_range_check_against_pointer() {
    let out = render_text(ListFormat::RawText, |b| {
        b.range_check(RANGE_BASE, RANGE_STACK, CodeFlags::USE_POINTER)
    });
    assert_eq!(out, "DE000000 80008100\n");
}

#[test]
fn test_ocarina_envelope_around_two_writes() {
    let out = render_text(ListFormat::Ocarina, |b| {
        b.write32(0x00001820, 0xAA, CodeFlags::NONE)?;
        b.write32(0x00001824, 0xBB, CodeFlags::NONE)
    });
    assert_eq!(
        out,
        "00D0C0DE 00D0C0DE\n\
         04001820 000000AA\n\
         04001824 000000BB\n\
         F0000000 00000000\n"
    );
}

#[test]
fn test_dolphin_envelope_with_description() {
    let meta = CodeMeta {
        name: "Infinite Missiles",
        author: "Yonder",
        description: &["Never runs out."],
    };
    let out = write_codelist(
        Vec::new(),
        ListFormat::Dolphin,
        HandlerLayout::DOLPHIN,
        &meta,
        |b: &mut CodeBuilder<'_, Vec<u8>>| {
            b.write16(0x0004, 0x00F6, CodeFlags::NONE)?;
            b.full_terminator()
        },
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "$Infinite Missiles [Yonder]\n\
         *Never runs out.\n\
         02000004 000000F6\n\
         E0000000 00000000\n"
    );
}

#[test]
fn test_string_write_pads_payload_to_eight_bytes() {
    let out = render_text(ListFormat::RawText, |b| {
        b.write_string(0x00200000, b"ABCDE", CodeFlags::NONE)
    });
    assert_eq!(out, "06200000 00000005\n41424344 45000000\n");
}

#[test]
fn test_string_write_binary_payload_is_packed() {
    let out = render(ListFormat::Raw, |b| {
        b.write_string(0x00200000, b"ABCDE", CodeFlags::NONE)
    });
    assert_eq!(
        out,
        vec![
            0x06, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, //
            0x41, 0x42, 0x43, 0x44, 0x45, 0x00, 0x00, 0x00, //
        ]
    );
}

#[test]
fn test_execute_asm_pads_to_even_words() {
    let out = render_text(ListFormat::RawText, |b| {
        b.execute_asm(&[0x3DC08000, 0x81CE1800, 0x4E800020])
    });
    assert_eq!(
        out,
        "C0000000 00000002\n3DC08000 81CE1800\n4E800020 00000000\n"
    );
}

#[test]
fn test_insert_asm_even_blob_gains_nop_and_terminator() {
    let out = render_text(ListFormat::RawText, |b| {
        b.insert_asm(0x00183A44, &[0x38600001, 0x38600002], CodeFlags::NONE)
    });
    assert_eq!(
        out,
        "C2183A44 00000002\n38600001 38600002\n60000000 00000000\n"
    );
}

#[test]
fn test_insert_asm_odd_blob_gains_terminator_only() {
    let out = render_text(ListFormat::RawText, |b| {
        b.insert_asm(0x00183A44, &[0x38600001], CodeFlags::NONE)
    });
    assert_eq!(out, "C2183A44 00000001\n38600001 00000000\n");
}

#[test]
fn test_serial_write_emits_two_lines() {
    let out = render_text(ListFormat::RawText, |b| {
        b.write_serial16(0x00100000, 0x1122, 8, 4, 1, CodeFlags::NONE)
    });
    assert_eq!(out, "08100000 00001122\n10070004 00000001\n");
}

#[test]
fn test_labels_account_for_serial_write_span() {
    // The serial write occupies two lines, so a goto over it must skip
    // three lines in total.
    let out = render_text(ListFormat::RawText, |b| {
        let end = b.declare_label();
        let offs = b.label_offset(end);
        b.goto(ExecStatus::Either, offs)?;
        b.write_serial8(0, 0, 1, 1, 0, CodeFlags::NONE)?;
        b.define_label(end);
        b.full_terminator()
    });
    assert_eq!(
        out,
        "66200002 00000000\n\
         08000000 00000000\n\
         00000001 00000000\n\
         E0000000 00000000\n"
    );
}

#[test]
fn test_line_pointer_lands_on_emitted_lines() {
    // Dolphin's handler: hook 0x80001800 (embedded 0x1800), binary 2880
    // bytes, so the list opens at 0x1800 + 0xB40 = 0x2340.
    let out = render_text(ListFormat::RawText, |b| {
        let first = b.line_pointer();
        b.write32(0x00002000, first, CodeFlags::NONE)?;
        let second = b.line_pointer();
        b.write32(0x00002004, second, CodeFlags::NONE)
    });
    assert_eq!(out, "04002000 00002340\n04002004 00002348\n");
}

#[test]
fn test_line_cap_overflow_fails_before_writing() {
    let result = write_codelist(
        Vec::new(),
        ListFormat::Gct,
        HandlerLayout::DOLPHIN,
        &META,
        |b: &mut CodeBuilder<'_, Vec<u8>>| {
            for _ in 0..=MAX_CODE_LINES {
                b.switch()?;
            }
            Ok(())
        },
    );
    assert!(matches!(
        result,
        Err(CodegenError::TooManyLines { lines, limit: 231 }) if lines == 232
    ));
}

#[test]
fn test_two_runs_are_byte_identical() {
    let body = |b: &mut CodeBuilder<'_, Vec<u8>>| {
        let end = b.declare_label();
        b.load_reg8(
            GeckoReg::R6,
            0x003E2C08,
            OffsetFlags::PTR_OR_BASE_ADDR,
            CodeFlags::NONE,
        )?;
        b.reg_direct_op(RegOp::And, GeckoReg::R6, RegOpRef::SrcValDstVal, 0x7)?;
        let offs = b.label_offset(end);
        b.goto(ExecStatus::False, offs)?;
        b.write8(0x00000835, 0x40, CodeFlags::USE_POINTER)?;
        b.define_label(end);
        b.full_terminator()
    };

    let first = render(ListFormat::Gct, body);
    let second = render(ListFormat::Gct, body);
    assert_eq!(first, second);
}

#[test]
fn test_gct_written_to_file_round_trips() {
    let mut file = tempfile::tempfile().unwrap();
    write_codelist(&mut file, ListFormat::Gct, HandlerLayout::DOLPHIN, &META, |b| {
        b.full_terminator()
    })
    .unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[0..4], &[0x00, 0xD0, 0xC0, 0xDE]);
    assert_eq!(&bytes[16..20], &[0xF0, 0x00, 0x00, 0x00]);
}

#[test]
fn test_without_line_pointers_still_resolves_labels() {
    let out = write_codelist(
        Vec::new(),
        ListFormat::RawText,
        HandlerLayout::DOLPHIN.without_line_pointers(),
        &META,
        |b: &mut CodeBuilder<'_, Vec<u8>>| {
            let end = b.declare_label();
            let offs = b.label_offset(end);
            b.goto(ExecStatus::False, offs)?;
            b.define_label(end);
            b.full_terminator()
        },
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "66100000 00000000\nE0000000 00000000\n"
    );
}

#[test]
fn test_conditional_block_with_endif_else() {
    let out = render_text(ListFormat::RawText, |b| {
        b.if32(Compare::Equal, 0x0000033C, 0x3, CodeFlags::USE_POINTER)?;
        b.write8(0x00000835, 0x00, CodeFlags::USE_POINTER)?;
        b.endif_else()?;
        b.write8(0x00000835, 0xC0, CodeFlags::USE_POINTER)?;
        b.full_terminator()
    });
    assert_eq!(
        out,
        "3000033C 00000003\n\
         10000835 00000000\n\
         E2100001 00000000\n\
         10000835 000000C0\n\
         E0000000 00000000\n"
    );
}
