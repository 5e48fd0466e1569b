// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Monotonic `vat_id` allocator (§3: "Node — owns `vat_id_base`
/// (monotonic allocator) ..."). Node bootstrap owns one of these and
/// hands out a fresh id each time it creates a vat, so ids never
/// collide within a node regardless of how many vats bootstrap ends up
/// creating (today: the inoculated vat 0 and the `NodeMan` vat; the
/// allocator exists so a future vat is just the next call, not a new
/// magic constant).
#[derive(Debug, Default)]
pub struct VatIdAllocator {
    next: i64,
}

impl VatIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
