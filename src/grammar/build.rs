// Copyright (c) 2016-2021 Fabian Schuiki

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=syntax.lalrpop");
    lalrpop::Configuration::new()
        .set_in_dir(".")
        .set_out_dir(env::var("OUT_DIR").unwrap())
        .process()
        .unwrap();
}
