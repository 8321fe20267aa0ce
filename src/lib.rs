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

pub mod code;
pub mod emitter;
pub mod errors;
pub mod listing;
pub mod sink;

use std::io::Write;

use anyhow::{Context, Result};

use crate::emitter::{CodeBuilder, HandlerLayout};
use crate::errors::CodegenError;
use crate::listing::{CodeMeta, ListFormat};

/// Generates one code in the chosen envelope, assuming Dolphin's code
/// handler layout. The body is run once per resolver pass and must be
/// deterministic.
pub fn generate<W, F>(out: W, format: ListFormat, meta: &CodeMeta, body: F) -> Result<W>
where
    W: Write,
    F: FnMut(&mut CodeBuilder<'_, W>) -> Result<(), CodegenError>,
{
    listing::write_codelist(out, format, HandlerLayout::DOLPHIN, meta, body)
        .context("Failed to generate the code list")
}
