//! Dockerfile authoring and serialization for dockwright.
//!
//! # Flow
//!
//! ```text
//! Dockerfile::new()
//!   .from_tag("docker/whalesay", "latest")   ── Instruction::From
//!   .run("apt-get -y update")                ── Instruction::Run
//!   .serialize(&FsWriter, &options)          ── join("\n") → ./Dockerfile
//! ```
//!
//! Every append formats its [`Instruction`] immediately, so the list always
//! holds final lines in call order. Nothing checks that the sequence is a
//! valid image definition; the container engine does that at build time.

pub mod dockerfile;
pub mod instruction;
pub mod writer;

pub use dockerfile::{Dockerfile, Instructions, SerializeOptions};
pub use instruction::{Instruction, Pair, Ports, Signal, Value, escape};
pub use writer::{DockerfileWriter, FsWriter, WriteError};
