//! Typed arena indices handed out by [`crate::Script`].
//!
//! Commands and pipelines refer to script-owned entities through these ids instead of
//! pointers. An id is only meaningful for the script that produced it.

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
        )]
        pub struct $name(pub u32);

        impl $crate::foundation::arena::ArenaId for $name {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Identifier of a [`crate::Buffer`] owned by a script.
    BufferId
);
arena_id!(
    /// Identifier of a [`crate::Shader`] owned by a script.
    ShaderId
);
arena_id!(
    /// Identifier of a [`crate::Pipeline`] owned by a script.
    PipelineId
);
arena_id!(
    /// Identifier of a [`crate::Sampler`] owned by a script.
    SamplerId
);
arena_id!(
    /// Identifier of a registered [`crate::Format`].
    FormatId
);
arena_id!(
    /// Identifier of a registered [`crate::Type`].
    TypeId
);
arena_id!(
    /// Identifier of a [`crate::Blas`] owned by a script.
    BlasId
);
arena_id!(
    /// Identifier of a [`crate::Tlas`] owned by a script.
    TlasId
);
