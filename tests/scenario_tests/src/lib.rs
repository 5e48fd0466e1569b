// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

// Intentionally empty: this package exists to host `tests/` integration
// tests exercising the vat scheduler and router end to end.
