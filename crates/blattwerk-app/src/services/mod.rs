// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — platform pieces the command line needs: where settings live
// and the native file dialogs.

pub mod data_dir;
pub mod dialogs;
