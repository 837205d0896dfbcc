fn main() {
    println!("cargo:rerun-if-env-changed=ALARM_CONFIG_JSON");

    // Only the device build links against ESP-IDF; host builds (tests,
    // fuzzing) need nothing from the build script.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
