//! Unique label generation for the compiler: a monotonic gensym
//! counter for branch targets, and a stable per-name derivation for
//! function entry points.

/// Owned by a single [`crate::compiler::Compiler`] run rather than
/// kept as global state; spec §9 allows either, and an owned counter
/// avoids cross-compilation interference without sacrificing anything
/// (uniqueness is only ever required *within* one emitted program).
#[derive(Debug, Default)]
pub struct Labels {
    counter: u64,
}

impl Labels {
    pub fn new() -> Labels {
        Labels { counter: 0 }
    }

    /// Returns a fresh label of the form `"{base}__{n}"`, unique among
    /// every label this factory has produced so far.
    pub fn gensym(&mut self, base: &str) -> String {
        let label = format!("{}__{}", base, self.counter);
        self.counter += 1;
        label
    }
}

/// The reserved label a function's body begins at. Stable across
/// calls so that recursive and mutually recursive `App`s can refer to
/// a callee compiled earlier or later in the same program.
pub fn function_label(name: &str) -> String {
    format!("function_{}_{}", normalize(name), fnv1a(name))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c == '-' {
                Some('_')
            } else {
                None
            }
        })
        .collect()
}

/// Deterministic 32-bit FNV-1a. Standard library `Hash` is seeded
/// randomly per process, which would make `function_label` vary
/// between runs and break REPL sessions that recompile the same
/// definition twice; this is fixed and process-independent instead.
fn fnv1a(input: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    let mut hash = OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
