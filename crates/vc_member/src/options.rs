use bitflags::bitflags;

bitflags! {
    /// Options used when creating an accessor.
    ///
    /// Every distinct value gets its own cached accessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_member::AccessOptions;
    ///
    /// assert!(AccessOptions::empty().validation_enabled());
    /// assert!(!AccessOptions::DISABLE_ARGUMENT_VALIDATION.validation_enabled());
    /// ```
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessOptions: u32 {
        /// Skip the object, type and existence guards on the hot path.
        ///
        /// Failures then surface as whatever the underlying assignment or
        /// late-bound lookup reports, with a less descriptive error.
        const DISABLE_ARGUMENT_VALIDATION = 1;
    }
}

impl AccessOptions {
    /// Returns `true` unless [`DISABLE_ARGUMENT_VALIDATION`](Self::DISABLE_ARGUMENT_VALIDATION) is set.
    #[inline]
    pub const fn validation_enabled(self) -> bool {
        !self.contains(Self::DISABLE_ARGUMENT_VALIDATION)
    }
}
