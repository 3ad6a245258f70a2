// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value conversions used by packet fields.
//!
//! - [`gbk`] - GBK <-> UTF-8 text conversion
//! - [`legacy_time`] - Day-count date/time values since 1899-12-30

pub mod gbk;
pub mod legacy_time;
