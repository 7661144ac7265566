use bool_array::BoolArray;

fn sieve(limit: usize) -> bool_array::Result<BoolArray> {
    let mut primes = BoolArray::with_all(limit + 1, true);
    primes.off(&[0, 1][..primes.len().min(2)])?;
    let mut n = 2;
    while n * n <= limit {
        if primes.get(n)? {
            let multiples: Vec<usize> = (n * n..=limit).step_by(n).collect();
            primes.off(&multiples)?;
        }
        n += 1;
    }
    Ok(primes)
}

fn main() -> bool_array::Result<()> {
    const LIMIT: usize = 100;
    let primes = sieve(LIMIT)?;
    println!("{} primes up to {LIMIT}", primes.count(true));
    println!("{:?}", primes.active());
    Ok(())
}
