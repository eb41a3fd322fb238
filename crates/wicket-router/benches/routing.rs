//! Routing benchmarks for the prefix-trie router.
//!
//! Run with: cargo bench -p wicket-router

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wicket_router::Router;

/// Generate a set of realistic API routes.
fn generate_routes(count: usize) -> Vec<(String, String)> {
    let resources = [
        "users",
        "orders",
        "products",
        "customers",
        "invoices",
        "payments",
    ];
    let methods = ["GET", "POST", "PUT", "DELETE"];

    let mut routes = Vec::new();

    // Add base resource routes
    for resource in &resources {
        routes.push(("GET".to_string(), format!("/{}", resource)));
        routes.push(("POST".to_string(), format!("/{}", resource)));
        routes.push(("GET".to_string(), format!("/{}/:id", resource)));
        routes.push(("PUT".to_string(), format!("/{}/:id", resource)));
        routes.push(("DELETE".to_string(), format!("/{}/:id", resource)));
    }

    // Add nested routes
    routes.push(("GET".to_string(), "/users/:user_id/orders".to_string()));
    routes.push((
        "GET".to_string(),
        "/users/:user_id/orders/:order_id".to_string(),
    ));
    routes.push((
        "GET".to_string(),
        "/products/:product_id/reviews".to_string(),
    ));
    routes.push((
        "GET".to_string(),
        "/products/:product_id/reviews/:review_id".to_string(),
    ));
    routes.push(("GET".to_string(), "/assets/*path".to_string()));

    // Fill to desired count with variations
    while routes.len() < count {
        let i = routes.len();
        let resource = resources[i % resources.len()];
        let method = methods[i % methods.len()];
        routes.push((method.to_string(), format!("/api/v{}/{}", i / 10, resource)));
    }

    routes.truncate(count);
    routes
}

/// Build a router with the given routes.
fn build_router(routes: &[(String, String)]) -> Router<usize> {
    let mut router = Router::new();
    for (i, (method, pattern)) in routes.iter().enumerate() {
        router
            .insert(method, pattern, i)
            .unwrap_or_else(|e| panic!("insert failed: {}", e));
    }
    router
}

fn bench_router_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("router_resolve");

    for route_count in [10, 50, 100, 500, 1000] {
        let routes = generate_routes(route_count);
        let router = build_router(&routes);

        // Benchmark static path lookup
        group.bench_with_input(
            BenchmarkId::new("static_path", route_count),
            &router,
            |b, router| {
                b.iter(|| {
                    black_box(router.resolve("GET", "/users"));
                });
            },
        );

        // Benchmark parameterized path lookup
        group.bench_with_input(
            BenchmarkId::new("param_path", route_count),
            &router,
            |b, router| {
                b.iter(|| {
                    black_box(router.resolve("GET", "/users/12345"));
                });
            },
        );

        // Benchmark nested param path lookup
        group.bench_with_input(
            BenchmarkId::new("nested_param_path", route_count),
            &router,
            |b, router| {
                b.iter(|| {
                    black_box(router.resolve("GET", "/users/12345/orders/67890"));
                });
            },
        );

        // Benchmark catch-all lookup
        group.bench_with_input(
            BenchmarkId::new("catch_all_path", route_count),
            &router,
            |b, router| {
                b.iter(|| {
                    black_box(router.resolve("GET", "/assets/css/vendor/site.css"));
                });
            },
        );

        // Benchmark not found path
        group.bench_with_input(
            BenchmarkId::new("not_found", route_count),
            &router,
            |b, router| {
                b.iter(|| {
                    black_box(router.resolve("GET", "/nonexistent/path/here"));
                });
            },
        );
    }

    group.finish();
}

fn bench_router_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("router_insert");

    for route_count in [10, 50, 100, 500] {
        let routes = generate_routes(route_count);

        group.bench_with_input(
            BenchmarkId::new("build_router", route_count),
            &routes,
            |b, routes| {
                b.iter(|| {
                    black_box(build_router(routes));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_router_resolve, bench_router_insert);
criterion_main!(benches);
