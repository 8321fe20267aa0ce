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

use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("code is {lines} lines long, over the code handler's limit of {limit} lines")]
    TooManyLines { lines: u32, limit: u32 },

    #[error("failed to write code output")]
    Io(#[from] std::io::Error),
}

/// Maps an open failure onto a short reason string for the driver's
/// one-line error report.
pub fn open_failure_reason(err: &std::io::Error) -> &'static str {
    match err.kind() {
        ErrorKind::NotFound => "no such file or directory",
        ErrorKind::PermissionDenied => "access denied",
        ErrorKind::IsADirectory => "path is a directory",
        ErrorKind::NotADirectory => "a path component is not a directory",
        ErrorKind::StorageFull => "no space left on device",
        ErrorKind::FileTooLarge => "file too large",
        ErrorKind::ReadOnlyFilesystem => "read-only file system",
        ErrorKind::ResourceBusy => "file is busy",
        ErrorKind::Interrupted => "interrupted by a signal",
        ErrorKind::InvalidInput => "invalid open mode",
        ErrorKind::OutOfMemory => "out of memory",
        _ => "unknown error",
    }
}
