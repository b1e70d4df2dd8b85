pub use codegen::{Emitter, Unit};
pub use compiler::{Compiler, Report};
pub use target::{Arch, Platform, TargetError, TargetProfile};

mod codegen;
mod compiler;
mod target;
