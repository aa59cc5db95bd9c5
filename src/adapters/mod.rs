pub mod macports;
