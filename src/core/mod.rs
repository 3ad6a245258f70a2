// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types shared by the codec modules.

pub mod error;

pub use error::{CodecError, FieldKind, Result};
