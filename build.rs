//! Scans `src/routes` for `.route("<path>", get(..).post(..))` calls and
//! writes the static table served at `/api/v1/routes.json`.

use std::{
    env,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use syn::{Expr, ExprMethodCall, Lit, visit::Visit};

// Must match `API_PREFIX` in src/routes/entry.rs.
const API_PREFIX: &str = "/api/v1";

const HTTP_METHODS: [&str; 9] = [
    "get", "post", "put", "delete", "patch", "head", "options", "trace", "any",
];

struct Route {
    method: String,
    path: String,
    source: String,
}

struct RouteCollector<'a> {
    prefix: &'static str,
    source: &'a str,
    routes: Vec<Route>,
}

impl<'ast> Visit<'ast> for RouteCollector<'_> {
    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        if call.method == "route" {
            match call.args.first().and_then(string_literal) {
                Some(path) => {
                    let path = match (self.prefix, path.as_str()) {
                        (prefix, "/") if !prefix.is_empty() => prefix.to_string(),
                        (prefix, path) => format!("{prefix}{path}"),
                    };
                    let mut methods = Vec::new();
                    if let Some(handler) = call.args.iter().nth(1) {
                        method_router_verbs(handler, &mut methods);
                    }
                    methods.reverse();
                    methods.dedup();
                    for method in methods {
                        self.routes.push(Route {
                            method,
                            path: path.clone(),
                            source: self.source.to_string(),
                        });
                    }
                }
                None => println!(
                    "cargo:warning=skipping non-literal route path in {}",
                    self.source
                ),
            }
        }
        syn::visit::visit_expr_method_call(self, call);
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(value) => Some(value.value()),
            _ => None,
        },
        Expr::Reference(inner) => string_literal(&inner.expr),
        _ => None,
    }
}

/// Walks a `get(a).post(b)` chain from the outside in, collecting verbs.
fn method_router_verbs(expr: &Expr, out: &mut Vec<String>) {
    let (name, next) = match expr {
        Expr::MethodCall(call) => (call.method.to_string(), Some(&*call.receiver)),
        Expr::Call(call) => match &*call.func {
            Expr::Path(path) => match path.path.segments.last() {
                Some(segment) => (segment.ident.to_string(), None),
                None => return,
            },
            _ => return,
        },
        _ => return,
    };
    if HTTP_METHODS.contains(&name.as_str()) {
        out.push(name.to_ascii_uppercase());
    }
    if let Some(next) = next {
        method_router_verbs(next, out);
    }
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|err| panic!("failed to read {}: {err}", dir.display()));
    for entry in entries {
        let path = entry
            .unwrap_or_else(|err| panic!("failed to read entry in {}: {err}", dir.display()))
            .path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let routes_dir = manifest_dir.join("src/routes");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", routes_dir.display());

    let mut files = Vec::new();
    rust_files(&routes_dir, &mut files);
    files.sort();

    let mut routes = Vec::new();
    for file in &files {
        println!("cargo:rerun-if-changed={}", file.display());
        let content = fs::read_to_string(file)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", file.display()));
        let parsed = syn::parse_file(&content)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", file.display()));
        let source = file
            .strip_prefix(&manifest_dir)
            .unwrap_or(file)
            .display()
            .to_string();
        // Routers under src/routes/api are nested below the API prefix.
        let prefix = if file.starts_with(routes_dir.join("api")) {
            API_PREFIX
        } else {
            ""
        };
        let mut collector = RouteCollector {
            prefix,
            source: &source,
            routes: Vec::new(),
        };
        collector.visit_file(&parsed);
        routes.extend(collector.routes);
    }
    routes.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));

    let mut output = String::from("static ROUTES: &[RouteInfo] = &[\n");
    for route in &routes {
        writeln!(
            output,
            "    RouteInfo {{ method: {:?}, path: {:?}, source: {:?} }},",
            route.method, route.path, route.source
        )
        .expect("writing to a String cannot fail");
    }
    output.push_str("];\n");

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR")).join("routes_generated.rs");
    fs::write(&out_path, output)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_path.display()));
}
