//! SQL schema for the campus SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS courses (
    course_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    workload    INTEGER NOT NULL CHECK (workload >= 1),
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    workload    INTEGER NOT NULL CHECK (workload >= 1),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Subject ↔ course many-to-many.
CREATE TABLE IF NOT EXISTS course_subject (
    course_id  INTEGER NOT NULL REFERENCES courses(course_id)  ON DELETE CASCADE,
    subject_id INTEGER NOT NULL REFERENCES subjects(subject_id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    PRIMARY KEY (course_id, subject_id)
);

CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    cpf        TEXT NOT NULL UNIQUE,
    birth_date TEXT NOT NULL,   -- ISO 8601 date
    email      TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Student ↔ course links ARE enrollment rows; there is no separate pivot.
-- The composite unique index is the final arbiter against double enrollment.
CREATE TABLE IF NOT EXISTS enrollments (
    enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id    INTEGER NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
    course_id     INTEGER NOT NULL REFERENCES courses(course_id)   ON DELETE CASCADE,
    status        TEXT NOT NULL DEFAULT 'active',   -- 'active' | 'suspended' | 'cancelled'
    enrolled_at   TEXT NOT NULL,
    suspended_at  TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL,
    UNIQUE (student_id, course_id)
);

CREATE INDEX IF NOT EXISTS enrollments_student_idx ON enrollments(student_id);
CREATE INDEX IF NOT EXISTS enrollments_course_idx  ON enrollments(course_id);
CREATE INDEX IF NOT EXISTS enrollments_status_idx  ON enrollments(status);

PRAGMA user_version = 1;
";
