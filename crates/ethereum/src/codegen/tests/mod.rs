//! Tests for event binding generation
