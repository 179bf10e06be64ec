fn main() {
    // sqlx::migrate! and the release-mode asset embedding both read these at compile time
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-changed=static");
}
