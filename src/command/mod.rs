pub mod analyze_stream;
