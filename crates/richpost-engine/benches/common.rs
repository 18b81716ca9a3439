// Benchmark helpers; each bench file only uses some of them
#[allow(dead_code)]
pub fn generate_post(paragraphs: usize) -> String {
    let base = "🔥 **Senior Rust Engineer**  at [Acme](https://acme.example)\n\n\n\
        - remote, __full time__\n- stack: `tokio`, ~~java~~ serde\n\
        Apply: https://acme.example/jobs/1. Questions? Write @hr_acme.\n\n";
    base.repeat(paragraphs)
}
