use criterion::{black_box, criterion_group, criterion_main, Criterion};
use horoscope::houses::{assemble_houses, locate_house, HouseInput, HouseSystem};
use horoscope::zodiac::Zodiac;

fn bench_house_systems(c: &mut Criterion) {
    let input = HouseInput::from_ramc(45.0, 51.5, 23.439_291_1, Zodiac::Tropical, 0.0);
    for system in HouseSystem::all() {
        let calculator = system.calculator();
        c.bench_function(&format!("cusps_{}", system.key()), |b| {
            b.iter(|| calculator.cusps(black_box(&input)))
        });
    }
}

fn bench_locate_house(c: &mut Criterion) {
    let input = HouseInput::from_ramc(45.0, 51.5, 23.439_291_1, Zodiac::Tropical, 0.0);
    let cusps = match HouseSystem::Placidus.calculator().cusps(&input) {
        Ok(cusps) => cusps,
        Err(err) => panic!("placidus failed: {err}"),
    };
    let houses = assemble_houses(&cusps, input.ascendant);

    c.bench_function("locate_house", |b| {
        b.iter(|| {
            let mut total = 0u32;
            for lon in 0..360 {
                total += u32::from(locate_house(black_box(&houses), lon as f64).id);
            }
            total
        })
    });
}

criterion_group!(benches, bench_house_systems, bench_locate_house);
criterion_main!(benches);
