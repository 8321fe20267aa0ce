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

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser as clap_parser;
use clap::ValueEnum;

use geckasm::code::*;
use geckasm::emitter::CodeBuilder;
use geckasm::emitter::constants::{RANGE_BASE, RANGE_STACK, reg_addr};
use geckasm::errors::{CodegenError, open_failure_reason};
use geckasm::listing::{CodeMeta, ListFormat};

#[derive(clap_parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Do not ask to press any key on exit (non-interactive)
    #[clap(short, long)]
    yes: bool,
    /// The file to output to (instead of stdout)
    #[clap(short, long)]
    outfile: Option<PathBuf>,
    /// The code list format to output
    #[clap(short, long, value_enum, default_value = "dolphin", ignore_case = true)]
    codefmt: FormatArg,
}

#[derive(ValueEnum, Clone, Copy)]
enum FormatArg {
    /// INI code list format; what Dolphin Emulator supports
    Dolphin,
    /// Gecko code list format; what real hardware loaders support
    Gct,
    /// Ocarina code list format; what many code managers support
    Ocarina,
    /// Raw binary output; no loader support
    Raw,
    /// Raw text output; no loader support
    #[value(name = "rawtext")]
    Rawtext,
}

impl From<FormatArg> for ListFormat {
    fn from(arg: FormatArg) -> ListFormat {
        match arg {
            FormatArg::Dolphin => ListFormat::Dolphin,
            FormatArg::Gct => ListFormat::Gct,
            FormatArg::Ocarina => ListFormat::Ocarina,
            FormatArg::Raw => ListFormat::Raw,
            FormatArg::Rawtext => ListFormat::RawText,
        }
    }
}

// Metroid Prime (GM8E01 0-00) field offsets used by the bundled code.
const STATE_MANAGER_FINAL_INPUT: u32 = 0x003E2C08;
const INPUT_L: u32 = 0x4;
const INPUT_R: u32 = 0x2;
const INPUT_DPAD_UP: u32 = 0x1;
const BUTTON_COMBO: u32 = INPUT_L | INPUT_R | INPUT_DPAD_UP;

const PLAYER_GUN_PTR: u32 = 0x003F3D44;
const GUN_PHAZON_BEAM_STATE: u32 = 0x0000033C;
const PHAZON_BEAM_ACTIVE: u32 = 0x3;
const PHAZON_BEAM_INACTIVE: u32 = 0x0;

const GUN_FLAGS: u32 = 0x00000835;
const GUN_IN_PHAZON_BEAM: u8 = 0x40;
const GUN_CAN_FIRE_PHAZON: u8 = 0x80;

const CODE_NAME: &str = "Toggle Phazon Beam (GM8E01 0-00) (see notes)";
const CODE_AUTHOR: &str = "Yonder";
const CODE_DESCRIPTION: &[&str] = &[
    "Toggle with L Trigger + R Trigger + DPad UP ALL at the SAME TIME.",
    "Holding down the button combo and/or incrementally pressing the button combo is buggy.",
    "NOTE: This uses gr6.",
];

fn toggle_phazon_beam<W: Write>(b: &mut CodeBuilder<'_, W>) -> Result<(), CodegenError> {
    let l_end = b.declare_label();

    b.load_reg8(
        GeckoReg::R6,
        STATE_MANAGER_FINAL_INPUT,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::NONE,
    )?;
    b.reg_direct_op(RegOp::And, GeckoReg::R6, RegOpRef::SrcValDstVal, BUTTON_COMBO)?;
    b.if32(Compare::Equal, reg_addr(6), BUTTON_COMBO, CodeFlags::NONE)?;
    let offs = b.label_offset(l_end);
    b.goto(ExecStatus::False, offs)?;

    // The gun only exists in-game; bail out on menus where the pointer is
    // garbage.
    b.load_pointer(
        PLAYER_GUN_PTR,
        None,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::NONE,
    )?;
    b.range_check(RANGE_BASE, RANGE_STACK, CodeFlags::USE_POINTER)?;
    let offs = b.label_offset(l_end);
    b.goto(ExecStatus::False, offs)?;

    b.if32(
        Compare::Equal,
        GUN_PHAZON_BEAM_STATE,
        PHAZON_BEAM_ACTIVE,
        CodeFlags::USE_POINTER,
    )?;
    b.load_reg8(
        GeckoReg::R6,
        GUN_FLAGS,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::USE_POINTER,
    )?;
    b.reg_direct_op(
        RegOp::And,
        GeckoReg::R6,
        RegOpRef::SrcValDstVal,
        !GUN_CAN_FIRE_PHAZON as u32 & 0xFF,
    )?;
    b.store_reg8(
        GeckoReg::R6,
        GUN_FLAGS,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::USE_POINTER,
    )?;
    let offs = b.label_offset(l_end);
    b.goto(ExecStatus::True, offs)?;

    b.if32(
        Compare::Equal,
        GUN_PHAZON_BEAM_STATE,
        PHAZON_BEAM_INACTIVE,
        CodeFlags::USE_POINTER,
    )?;
    b.load_reg8(
        GeckoReg::R6,
        GUN_FLAGS,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::USE_POINTER,
    )?;
    b.reg_direct_op(
        RegOp::Or,
        GeckoReg::R6,
        RegOpRef::SrcValDstVal,
        (GUN_IN_PHAZON_BEAM | GUN_CAN_FIRE_PHAZON) as u32,
    )?;
    b.store_reg8(
        GeckoReg::R6,
        GUN_FLAGS,
        OffsetFlags::PTR_OR_BASE_ADDR,
        CodeFlags::USE_POINTER,
    )?;

    b.define_label(l_end);
    b.full_terminator()
}

fn emit_code<W: Write>(out: W, format: ListFormat) -> anyhow::Result<()> {
    let meta = CodeMeta {
        name: CODE_NAME,
        author: CODE_AUTHOR,
        description: CODE_DESCRIPTION,
    };
    let mut out = geckasm::generate(out, format, &meta, toggle_phazon_beam)?;
    out.flush()?;
    Ok(())
}

/// Finds a repeated `-o`/`-c` (or long form) before parsing; clap keeps
/// the last value when an option repeats, and a repeat must fail instead.
fn duplicated_option(args: &[OsString]) -> Option<char> {
    let mut outfile = 0;
    let mut codefmt = 0;
    for arg in args.iter().skip(1) {
        let Some(s) = arg.to_str() else { continue };
        if s == "--" {
            break;
        }
        if let Some(long) = s.strip_prefix("--") {
            if long == "outfile" || long.starts_with("outfile=") {
                outfile += 1;
            } else if long == "codefmt" || long.starts_with("codefmt=") {
                codefmt += 1;
            }
        } else if s.starts_with('-') && s.len() > 1 {
            // A short cluster ends at the first option that takes a value;
            // the rest of the token belongs to it.
            for ch in s.chars().skip(1) {
                match ch {
                    'o' => {
                        outfile += 1;
                        break;
                    }
                    'c' => {
                        codefmt += 1;
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    if outfile > 1 {
        Some('o')
    } else if codefmt > 1 {
        Some('c')
    } else {
        None
    }
}

fn wait_for_key() {
    eprint!("Press any key to continue . . . ");
    let mut byte = [0u8; 1];
    let _ = io::stdin().read(&mut byte);
    eprintln!();
}

fn run() -> i32 {
    let args: Vec<OsString> = std::env::args_os().collect();
    if let Some(opt) = duplicated_option(&args) {
        eprintln!("ERROR: Cannot specify '{}' option multiple times", opt);
        return 1;
    }

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            // Help and usage errors alike are a non-zero exit.
            let _ = err.print();
            return 1;
        }
    };
    let format = ListFormat::from(opts.codefmt);

    let result = match &opts.outfile {
        Some(path) => match File::create(path) {
            Ok(file) => emit_code(BufWriter::new(file), format),
            Err(err) => {
                eprintln!(
                    "ERROR: Couldn't open file \"{}\": {}",
                    path.display(),
                    open_failure_reason(&err)
                );
                return 1;
            }
        },
        None => emit_code(io::stdout().lock(), format),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {:#}", err);
        return 1;
    }

    if !opts.yes {
        wait_for_key();
    }
    0
}

fn main() {
    std::process::exit(run());
}
