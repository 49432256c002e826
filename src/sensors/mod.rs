// Copyright @yucwang 2026

pub mod thin_lens;
