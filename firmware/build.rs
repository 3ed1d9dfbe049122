#[cfg(not(any(feature = "blackpill")))]
compile_error!("No hardware platform selected.");

fn main() {
    // memory.x comes from embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
