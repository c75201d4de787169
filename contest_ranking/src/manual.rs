/*!

This is the long-form manual for `contest_ranking` and `eurotally`.

## Scoring

Each state votes any number of times for the other states. When voting closes,
the votes of every state are turned into points:

| rank | 1  | 2  | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 |
|------|----|----|---|---|---|---|---|---|---|----|
| pts  | 12 | 10 | 8 | 7 | 6 | 5 | 4 | 3 | 2 | 1  |

Only the ten states with the most votes get points. When two states received
the same number of votes, the state with the smaller id is ranked first. States
without any vote are never ranked, even when fewer than ten states got votes.

Judges do not vote: each judge hands in the ten states of its choice, in order,
and the same table applies.

The final score of a state is

```text
audiencePercent / 100 * (state points / number of states)
  + (100 - audiencePercent) / 100 * (judge points / number of judges)
```

The judge term is zero when there are no judges. States are ordered on the exact
value of this fraction, so two states with the same score always appear by
ascending id, even when their points are split differently.

## Input format

`eurotally` reads a contest description in JSON:

```text
{
  "contestName": "grand final",
  "audiencePercent": 60,
  "states": [
    { "id": 1, "name": "france", "song": "la vie" },
    { "id": 2, "name": "israel", "song": "toy" }
  ],
  "judges": [
    { "id": 1, "name": "simon", "results": [2, 1, 3, 4, 5, 6, 7, 8, 9, 10] }
  ],
  "votes": [
    { "from": 1, "to": 2, "count": 3 },
    { "from": 2, "to": 1 }
  ]
}
```

- `audiencePercent` (number, optional, between 1 and 100): defaults to 50. The
  `--audience-percent` flag overrides it.
- names and songs are made of lowercase letters and spaces.
- every judge must rank exactly ten distinct registered states.
- `count` (number, optional): defaults to 1. A state may not vote for itself.
  The votes of all the entries for the same pair must add up to at most
  18446744073709551615, the largest 64-bit count.

## Output format

The summary is written in JSON:

```text
{
  "config": { "contest": "grand final", "audiencePercent": 60 },
  "results": [ { "state": 2, "name": "israel", "score": "7.200" }, ... ],
  "audienceFavorite": [ "israel", "france" ],
  "friendlyStates": [ [ "france", "israel" ] ]
}
```

`friendlyStates` lists the pairs of states that gave each other 12 points.

 */
