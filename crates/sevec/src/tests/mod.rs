// Copyright (c) 2026 The sevec contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod config;
mod growth;
mod properties;
