//! Typed comparison checks.
//!
//! Each comparator comes as an `is_*` / `isnt_*` pair sharing one private
//! compare function; the pair replaces a boolean "negate" parameter in the
//! public API. On an unexpected outcome the comparator emits a got/expected
//! diagnostic pair through the engine; a negated check has no single
//! expected value, so its expected line reads "anything else".

use std::panic::Location;

use crate::engine::Tap;
use crate::sink::OutputSink;

impl<S: OutputSink> Tap<S> {
    // ========================================================================
    // INTEGERS
    // ========================================================================

    /// Check that two integers are equal.
    #[track_caller]
    pub fn is_int(&mut self, got: i64, expected: i64, label: &str) -> bool {
        self.int_eq(got, expected, false, Location::caller(), label)
    }

    /// Check that two integers differ.
    #[track_caller]
    pub fn isnt_int(&mut self, got: i64, expected: i64, label: &str) -> bool {
        self.int_eq(got, expected, true, Location::caller(), label)
    }

    fn int_eq(
        &mut self,
        got: i64,
        expected: i64,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let passed = self.record(got == expected, negate, location, label);
        if !passed {
            self.report_values(negate, &got.to_string(), &expected.to_string());
        }
        passed
    }

    // ========================================================================
    // FLOATING POINT
    // ========================================================================

    /// Check that two floats are equal within machine epsilon. This is a
    /// tolerance comparison, not a bit-exact one.
    #[track_caller]
    pub fn is_double(&mut self, got: f64, expected: f64, label: &str) -> bool {
        self.double_eq(got, expected, false, Location::caller(), label)
    }

    /// Check that two floats differ by at least machine epsilon.
    #[track_caller]
    pub fn isnt_double(&mut self, got: f64, expected: f64, label: &str) -> bool {
        self.double_eq(got, expected, true, Location::caller(), label)
    }

    fn double_eq(
        &mut self,
        got: f64,
        expected: f64,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let equal = (got - expected).abs() < f64::EPSILON;
        let passed = self.record(equal, negate, location, label);
        if !passed {
            self.report_values(negate, &got.to_string(), &expected.to_string());
        }
        passed
    }

    // ========================================================================
    // CHARACTERS AND STRINGS
    // ========================================================================

    /// Check that two characters are equal.
    #[track_caller]
    pub fn is_char(&mut self, got: char, expected: char, label: &str) -> bool {
        self.char_eq(got, expected, false, Location::caller(), label)
    }

    /// Check that two characters differ.
    #[track_caller]
    pub fn isnt_char(&mut self, got: char, expected: char, label: &str) -> bool {
        self.char_eq(got, expected, true, Location::caller(), label)
    }

    fn char_eq(
        &mut self,
        got: char,
        expected: char,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let passed = self.record(got == expected, negate, location, label);
        if !passed {
            self.report_values(negate, &got.to_string(), &expected.to_string());
        }
        passed
    }

    /// Check that two strings are byte-for-byte equal over their full
    /// length, not just a common prefix.
    #[track_caller]
    pub fn is_str(&mut self, got: &str, expected: &str, label: &str) -> bool {
        self.str_eq(got, expected, false, Location::caller(), label)
    }

    /// Check that two strings differ somewhere.
    #[track_caller]
    pub fn isnt_str(&mut self, got: &str, expected: &str, label: &str) -> bool {
        self.str_eq(got, expected, true, Location::caller(), label)
    }

    fn str_eq(
        &mut self,
        got: &str,
        expected: &str,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let passed = self.record(got == expected, negate, location, label);
        if !passed {
            self.report_values(negate, got, expected);
        }
        passed
    }

    // ========================================================================
    // IDENTITY AND BYTE RANGES
    // ========================================================================

    /// Check that two references point at the same underlying value.
    #[track_caller]
    pub fn is_ref<T: ?Sized>(&mut self, got: &T, expected: &T, label: &str) -> bool {
        self.ref_eq(got, expected, false, Location::caller(), label)
    }

    /// Check that two references point at different values.
    #[track_caller]
    pub fn isnt_ref<T: ?Sized>(&mut self, got: &T, expected: &T, label: &str) -> bool {
        self.ref_eq(got, expected, true, Location::caller(), label)
    }

    fn ref_eq<T: ?Sized>(
        &mut self,
        got: &T,
        expected: &T,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let passed = self.record(std::ptr::eq(got, expected), negate, location, label);
        if !passed {
            self.report_values(negate, &format!("{:p}", got), &format!("{:p}", expected));
        }
        passed
    }

    /// Check that the first `size` bytes of two buffers are equal.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the length of either buffer.
    #[track_caller]
    pub fn is_mem(&mut self, got: &[u8], expected: &[u8], size: usize, label: &str) -> bool {
        self.mem_eq(got, expected, size, false, Location::caller(), label)
    }

    /// Check that the first `size` bytes of two buffers differ.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the length of either buffer.
    #[track_caller]
    pub fn isnt_mem(&mut self, got: &[u8], expected: &[u8], size: usize, label: &str) -> bool {
        self.mem_eq(got, expected, size, true, Location::caller(), label)
    }

    fn mem_eq(
        &mut self,
        got: &[u8],
        expected: &[u8],
        size: usize,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let equal = got[..size] == expected[..size];
        let passed = self.record(equal, negate, location, label);
        if !passed {
            self.report_values(
                negate,
                &format!("{:p}(+{:#x})", got.as_ptr(), size),
                &format!("{:p}(+{:#x})", expected.as_ptr(), size),
            );
        }
        passed
    }
}
