//! Performance benchmarks for the hot confidence-scoring path.
//!
//! Run with: `cargo bench`
//!
//! Every candidate zone in every section goes through the lexical and
//! linguistic scorers, so these dominate extraction time on large books.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cookbook_extract::lexical;
use cookbook_extract::linguistic;
use cookbook_extract::zone::ComponentKind;

const INGREDIENT_TEXT: &str = "\
2 cups all-purpose flour
1 tsp kosher salt
3 large eggs, beaten
1 cup whole milk
2 tbsp unsalted butter, melted
1 cup sugar
2 tsp baking powder
1 tsp vanilla extract";

const INSTRUCTION_TEXT: &str = "\
Preheat the oven to 350 degrees and grease a nine inch pan. Whisk the flour, \
sugar, and salt together in a large bowl. Beat in the eggs, milk, and melted \
butter until the batter is smooth. Pour into the pan and bake for 30 minutes, \
until a skewer comes out clean. Cool on a rack, then slice and serve.";

const METADATA_TEXT: &str = "Serves 4-6 | Prep: 15 minutes | Cook: 1 hour 30 minutes";

fn bench_lexical(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical_confidence");
    for (name, kind, text) in [
        ("ingredients", ComponentKind::Ingredients, INGREDIENT_TEXT),
        ("instructions", ComponentKind::Instructions, INSTRUCTION_TEXT),
        ("metadata", ComponentKind::Metadata, METADATA_TEXT),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| lexical::confidence(kind, black_box(text)));
        });
    }
    group.finish();
}

fn bench_linguistic(c: &mut Criterion) {
    let mut group = c.benchmark_group("linguistic_score");
    for (name, kind, text) in [
        ("ingredients", ComponentKind::Ingredients, INGREDIENT_TEXT),
        ("instructions", ComponentKind::Instructions, INSTRUCTION_TEXT),
        ("metadata", ComponentKind::Metadata, METADATA_TEXT),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| linguistic::score(kind, black_box(text)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lexical, bench_linguistic);
criterion_main!(benches);
